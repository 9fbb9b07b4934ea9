/*!
 * Scheduler Types
 * Step results and the immutable snapshots handed to renderers
 */

use super::gantt::GanttChart;
use crate::core::config::Quantum;
use crate::core::types::{Pid, Ticks};
use crate::process::ProcessState;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One execution slice on the Gantt chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    pub pid: Pid,
    pub start: Ticks,
    pub length: Ticks,
    /// This slice consumed the last of the process's burst
    pub finished: bool,
}

impl Slice {
    #[inline]
    pub fn end(&self) -> Ticks {
        self.start + self.length
    }
}

/// How an execution slice ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SliceEnd {
    /// Quantum expired; the process went to the back of the ready queue
    Preempted { remaining: Ticks },
    /// Burst exhausted
    Finished { turnaround: Ticks },
}

/// What a single scheduling decision did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOutcome {
    /// No process set is loaded
    NothingLoaded,
    /// Every process has finished; stepping further does nothing
    Complete,
    /// Ready queue was empty; time jumped to the next arrival
    Idle {
        from: Ticks,
        to: Ticks,
        admitted: Vec<Pid>,
    },
    /// A process ran for one slice
    Ran {
        slice: Slice,
        end: SliceEnd,
        /// Pids that sat in the ready queue for the whole slice
        queued: Vec<Pid>,
        all_complete: bool,
    },
    /// A finished process was found at the head of the queue and dropped
    Skipped { pid: Pid },
}

impl StepOutcome {
    /// No further step can change the simulation
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::NothingLoaded | Self::Complete => true,
            Self::Ran { all_complete, .. } => *all_complete,
            Self::Idle { .. } | Self::Skipped { .. } => false,
        }
    }

    /// The executed slice, if any
    pub fn slice(&self) -> Option<&Slice> {
        match self {
            Self::Ran { slice, .. } => Some(slice),
            _ => None,
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingLoaded => f.write_str("Load processes first."),
            Self::Complete => f.write_str("All processes completed."),
            Self::Idle { to, .. } => write!(f, "Time advanced to {}", to),
            Self::Skipped { pid } => write!(f, "P{} already finished; skipped", pid),
            Self::Ran {
                slice,
                end,
                all_complete,
                ..
            } => {
                write!(
                    f,
                    "t={}: Running P{} for {}. ",
                    slice.start, slice.pid, slice.length
                )?;
                match end {
                    SliceEnd::Preempted { remaining } => {
                        write!(f, "P{} preempted; remaining {}", slice.pid, remaining)?
                    }
                    SliceEnd::Finished { .. } => {
                        write!(f, "P{} finished at t={}", slice.pid, slice.end())?
                    }
                }
                if *all_complete {
                    f.write_str(". All processes completed.")?;
                }
                Ok(())
            }
        }
    }
}

/// What the CPU did during the last step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CpuState {
    Idle,
    Running { pid: Pid, length: Ticks },
}

/// Ready queue element as displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub pid: Pid,
    pub remaining: Ticks,
}

/// One row of the per-process statistics table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRow {
    pub pid: Pid,
    pub burst: Ticks,
    pub arrival: Ticks,
    pub remaining: Ticks,
    pub waiting: Ticks,
    /// `None` while the process is still pending
    pub turnaround: Option<Ticks>,
    pub state: ProcessState,
}

/// Running means over the whole process set
///
/// Unfinished processes contribute zero turnaround but still count in the
/// denominator, so averages grow as the run progresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub waiting: f64,
    pub turnaround: f64,
}

impl fmt::Display for Averages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "avg waiting {:.2}, avg turnaround {:.2}",
            self.waiting, self.turnaround
        )
    }
}

/// Scheduler counters for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub slices: u64,
    pub preemptions: u64,
    pub completions: u64,
    pub idle_jumps: u64,
    pub busy_time: Ticks,
    pub idle_time: Ticks,
}

impl SchedulerStats {
    /// Fraction of elapsed simulation time the CPU was busy
    pub fn utilization(&self) -> f64 {
        let elapsed = self.busy_time + self.idle_time;
        if elapsed == 0 {
            0.0
        } else {
            self.busy_time as f64 / elapsed as f64
        }
    }
}

/// Complete, immutable view of the engine after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    pub time: Ticks,
    pub quantum: Quantum,
    pub cpu: CpuState,
    pub ready_queue: Vec<QueueEntry>,
    pub processes: Vec<ProcessRow>,
    pub averages: Averages,
    pub stats: SchedulerStats,
    pub completed: usize,
    pub total: usize,
    pub gantt: GanttChart,
}

impl Snapshot {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Result of `Scheduler::step`: the decision, its explanation, and the state it left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub outcome: StepOutcome,
    pub explanation: String,
    pub snapshot: Snapshot,
}

impl Step {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }
}
