/*!
 * Process Types
 * Validated process definitions and the engine's per-process record
 */

use crate::core::types::{Pid, Ticks};
use serde::{Deserialize, Serialize};

/// Unvalidated process row, as entered by the user or read from a workload file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProcess {
    pub burst: i64,
    #[serde(default)]
    pub arrival: i64,
}

impl RawProcess {
    pub fn new(burst: i64, arrival: i64) -> Self {
        Self { burst, arrival }
    }
}

/// A validated, schedulable unit
///
/// Only the loader constructs these, so `burst >= 1` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessSpec {
    pid: Pid,
    burst: Ticks,
    arrival: Ticks,
}

impl ProcessSpec {
    pub(crate) fn new(pid: Pid, burst: Ticks, arrival: Ticks) -> Self {
        debug_assert!(burst >= 1);
        Self {
            pid,
            burst,
            arrival,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn burst(&self) -> Ticks {
        self.burst
    }

    #[inline]
    pub fn arrival(&self) -> Ticks {
        self.arrival
    }
}

/// Process lifecycle as seen between steps
///
/// A process is only `Running` inside a step; at step boundaries the pid that
/// just ran is reported through the CPU state of the snapshot instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Not yet admitted to the ready queue
    NotArrived,
    /// Admitted and waiting for the CPU
    Ready,
    /// Completed (terminal)
    Finished,
}

/// Engine-owned runtime record for one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    spec: ProcessSpec,
    pub(crate) remaining: Ticks,
    pub(crate) waiting: Ticks,
    pub(crate) turnaround: Option<Ticks>,
    pub(crate) enqueued: bool,
}

impl Process {
    pub fn new(spec: ProcessSpec) -> Self {
        Self {
            spec,
            remaining: spec.burst(),
            waiting: 0,
            turnaround: None,
            enqueued: false,
        }
    }

    /// Restore the initial, un-run values
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.spec);
    }

    #[inline]
    pub fn spec(&self) -> &ProcessSpec {
        &self.spec
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.spec.pid()
    }

    #[inline]
    pub fn burst(&self) -> Ticks {
        self.spec.burst()
    }

    #[inline]
    pub fn arrival(&self) -> Ticks {
        self.spec.arrival()
    }

    #[inline]
    pub fn remaining(&self) -> Ticks {
        self.remaining
    }

    #[inline]
    pub fn waiting(&self) -> Ticks {
        self.waiting
    }

    /// Completion time minus arrival, set once when the process finishes
    #[inline]
    pub fn turnaround(&self) -> Option<Ticks> {
        self.turnaround
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.turnaround.is_some()
    }

    #[inline]
    pub fn is_enqueued(&self) -> bool {
        self.enqueued
    }

    /// CPU time consumed so far
    #[inline]
    pub fn executed(&self) -> Ticks {
        self.burst() - self.remaining
    }

    pub fn state(&self) -> ProcessState {
        if self.is_finished() {
            ProcessState::Finished
        } else if self.enqueued {
            ProcessState::Ready
        } else {
            ProcessState::NotArrived
        }
    }

    /// Eligible for admission at `now`
    #[inline]
    pub(crate) fn is_admissible(&self, now: Ticks) -> bool {
        !self.enqueued && !self.is_finished() && self.arrival() <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_process_is_unrun() {
        let p = Process::new(ProcessSpec::new(1, 5, 3));
        assert_eq!(p.remaining(), 5);
        assert_eq!(p.waiting(), 0);
        assert_eq!(p.turnaround(), None);
        assert_eq!(p.state(), ProcessState::NotArrived);
        assert!(!p.is_admissible(2));
        assert!(p.is_admissible(3));
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut p = Process::new(ProcessSpec::new(2, 4, 0));
        p.remaining = 0;
        p.waiting = 7;
        p.turnaround = Some(11);
        p.enqueued = true;
        assert_eq!(p.state(), ProcessState::Finished);

        p.reset();
        assert_eq!(p, Process::new(ProcessSpec::new(2, 4, 0)));
    }

    #[test]
    fn test_raw_process_arrival_defaults_to_zero() {
        let raw: RawProcess = serde_json::from_str(r#"{"burst": 4}"#).unwrap();
        assert_eq!(raw, RawProcess::new(4, 0));
    }
}
