/*!
 * Scheduler Statistics
 * Per-process table, running averages and snapshot assembly
 */

use super::types::{
    Averages, CpuState, ProcessRow, QueueEntry, SchedulerStats, Snapshot, StepOutcome,
};
use super::Scheduler;

impl Scheduler {
    /// Counters for the current run
    #[inline]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Mean waiting and turnaround over all loaded processes
    ///
    /// Turnaround only counts finished processes, but the divisor is always
    /// the full process count.
    pub fn averages(&self) -> Averages {
        let count = self.processes.len();
        if count == 0 {
            return Averages::default();
        }
        let total_waiting: u128 = self.processes.iter().map(|p| p.waiting() as u128).sum();
        let total_turnaround: u128 = self
            .processes
            .iter()
            .filter_map(|p| p.turnaround())
            .map(u128::from)
            .sum();

        Averages {
            waiting: total_waiting as f64 / count as f64,
            turnaround: total_turnaround as f64 / count as f64,
        }
    }

    /// Stats table, one row per process in pid order
    pub fn process_rows(&self) -> Vec<ProcessRow> {
        self.processes
            .iter()
            .map(|p| ProcessRow {
                pid: p.pid(),
                burst: p.burst(),
                arrival: p.arrival(),
                remaining: p.remaining(),
                waiting: p.waiting(),
                turnaround: p.turnaround(),
                state: p.state(),
            })
            .collect()
    }

    /// Ready queue with remaining time per entry, head first
    pub fn queue_entries(&self) -> Vec<QueueEntry> {
        self.ready_queue
            .iter()
            .map(|&idx| {
                let p = &self.processes[idx];
                QueueEntry {
                    pid: p.pid(),
                    remaining: p.remaining(),
                }
            })
            .collect()
    }

    /// Immutable view of the current state, with the CPU shown per `last`
    pub fn snapshot(&self, last: &StepOutcome) -> Snapshot {
        let cpu = match last.slice() {
            Some(slice) => CpuState::Running {
                pid: slice.pid,
                length: slice.length,
            },
            None => CpuState::Idle,
        };

        Snapshot {
            run_id: self.run_id,
            time: self.current_time,
            quantum: self.quantum,
            cpu,
            ready_queue: self.queue_entries(),
            processes: self.process_rows(),
            averages: self.averages(),
            stats: self.stats,
            completed: self.completed,
            total: self.processes.len(),
            gantt: self.gantt.clone(),
        }
    }

    /// Snapshot between steps, with the CPU idle
    pub fn current_snapshot(&self) -> Snapshot {
        self.snapshot(&StepOutcome::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Quantum;
    use crate::process::{ProcessState, Workload};

    #[test]
    fn test_partial_averages_divide_by_total() {
        let workload =
            Workload::from_pairs(Quantum::new(2).unwrap(), &[(1, 0), (4, 0)]).unwrap();
        let mut scheduler = Scheduler::with_workload(&workload);

        scheduler.step(); // P1 finishes at 1, P2 waited 1
        let averages = scheduler.averages();
        assert_eq!(averages.turnaround, 0.5);
        assert_eq!(averages.waiting, 0.5);
    }

    #[test]
    fn test_snapshot_reflects_last_step() {
        let workload =
            Workload::from_pairs(Quantum::new(2).unwrap(), &[(3, 0), (1, 4)]).unwrap();
        let mut scheduler = Scheduler::with_workload(&workload);

        let step = scheduler.step();
        let snap = &step.snapshot;
        assert_eq!(snap.cpu, CpuState::Running { pid: 1, length: 2 });
        assert_eq!(snap.time, 2);
        assert_eq!(
            snap.ready_queue,
            vec![QueueEntry {
                pid: 1,
                remaining: 1
            }]
        );
        assert_eq!(snap.processes[0].state, ProcessState::Ready);
        assert_eq!(snap.processes[1].state, ProcessState::NotArrived);
        assert_eq!(snap.processes[1].turnaround, None);
        assert_eq!(snap.gantt.len(), 1);
        assert_eq!(snap.total, 2);
        assert!(!snap.is_complete());

        assert_eq!(scheduler.current_snapshot().cpu, CpuState::Idle);
    }
}
