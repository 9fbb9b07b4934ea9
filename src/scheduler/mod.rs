/*!
 * Round-Robin Scheduler Engine
 * Deterministic, single-threaded simulation advanced one decision at a time
 */

use crate::core::config::Quantum;
use crate::core::types::{Pid, Ticks};
use crate::process::{Process, Workload};
use std::collections::VecDeque;
use tracing::info;
use uuid::Uuid;

pub mod gantt;
mod operations;
pub mod report;
mod stats;
pub mod types;

pub use gantt::GanttChart;
pub use types::{
    Averages, CpuState, ProcessRow, QueueEntry, SchedulerStats, Slice, SliceEnd, Snapshot, Step,
    StepOutcome,
};

/// Round-Robin scheduling engine
///
/// Owns every piece of simulation state: the process records, the FIFO ready
/// queue (indices into `processes`), the clock and the Gantt history. All
/// invariants hold at every step boundary, so callers may stop stepping at
/// any time. Concurrent runs need independent instances.
#[derive(Debug, Clone)]
pub struct Scheduler {
    processes: Vec<Process>,
    ready_queue: VecDeque<usize>,
    current_time: Ticks,
    completed: usize,
    quantum: Quantum,
    gantt: GanttChart,
    stats: SchedulerStats,
    run_id: Option<Uuid>,
}

impl Scheduler {
    /// Create an engine with nothing loaded
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            ready_queue: VecDeque::new(),
            current_time: 0,
            completed: 0,
            quantum: Quantum::default(),
            gantt: GanttChart::new(),
            stats: SchedulerStats::default(),
            run_id: None,
        }
    }

    /// Create an engine with a workload already loaded
    pub fn with_workload(workload: &Workload) -> Self {
        let mut scheduler = Self::new();
        scheduler.load(workload);
        scheduler
    }

    /// Replace the process set and quantum, then start a fresh run
    pub fn load(&mut self, workload: &Workload) {
        self.processes = workload
            .processes()
            .iter()
            .copied()
            .map(Process::new)
            .collect();
        self.quantum = workload.quantum();
        self.reset();
        info!(
            run_id = ?self.run_id,
            processes = self.processes.len(),
            quantum = self.quantum.ticks(),
            "Workload loaded"
        );
    }

    /// Restart the loaded process set from time 0
    pub fn reset(&mut self) {
        self.current_time = 0;
        self.completed = 0;
        self.ready_queue.clear();
        self.gantt.clear();
        self.stats = SchedulerStats::default();
        self.processes.iter_mut().for_each(Process::reset);
        self.run_id = if self.processes.is_empty() {
            None
        } else {
            Some(Uuid::new_v4())
        };
        info!(run_id = ?self.run_id, "Simulation reset");
    }

    /// Drop the process set entirely
    pub fn clear(&mut self) {
        self.processes.clear();
        self.reset();
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        !self.processes.is_empty()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.is_loaded() && self.completed == self.processes.len()
    }

    #[inline]
    pub fn current_time(&self) -> Ticks {
        self.current_time
    }

    #[inline]
    pub fn quantum(&self) -> Quantum {
        self.quantum
    }

    #[inline]
    pub fn completed(&self) -> usize {
        self.completed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    #[inline]
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid() == pid)
    }

    /// Ready queue pids, head first
    pub fn ready_queue(&self) -> Vec<Pid> {
        self.ready_queue
            .iter()
            .map(|&idx| self.processes[idx].pid())
            .collect()
    }

    #[inline]
    pub fn gantt(&self) -> &GanttChart {
        &self.gantt
    }

    #[inline]
    pub fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
