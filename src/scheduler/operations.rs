/*!
 * Scheduler Core Operations
 * Arrival admission, idle fast-forward and quantum-bounded execution
 */

use super::types::{Slice, SliceEnd, Step, StepOutcome};
use super::Scheduler;
use crate::core::types::Pid;
use tracing::{debug, info, warn};

impl Scheduler {
    /// Admit every process that has arrived by now, in input order
    ///
    /// A process admitted late (it arrived while another process held the
    /// CPU mid-slice) is charged the gap as waiting time, so that
    /// `turnaround == waiting + burst` holds once it finishes. Charging only
    /// processes already queued, as the browser visualizer does, would leave
    /// that gap unaccounted.
    pub(super) fn admit_arrivals(&mut self) -> Vec<Pid> {
        let now = self.current_time;
        let mut admitted = Vec::new();

        for (idx, process) in self.processes.iter_mut().enumerate() {
            if !process.is_admissible(now) {
                continue;
            }
            process.enqueued = true;
            process.waiting += now - process.arrival();
            self.ready_queue.push_back(idx);
            admitted.push(process.pid());
        }

        if !admitted.is_empty() {
            debug!(run_id = ?self.run_id, time = now, ?admitted, "Admitted arrivals");
        }
        admitted
    }

    /// Advance the simulation by exactly one scheduling decision
    pub fn step(&mut self) -> Step {
        let outcome = self.advance();
        let snapshot = self.snapshot(&outcome);
        Step {
            explanation: outcome.to_string(),
            outcome,
            snapshot,
        }
    }

    fn advance(&mut self) -> StepOutcome {
        if self.processes.is_empty() {
            return StepOutcome::NothingLoaded;
        }

        self.admit_arrivals();

        let Some(idx) = self.ready_queue.pop_front() else {
            return self.fast_forward();
        };

        if self.processes[idx].is_finished() {
            // Queue discipline should make this unreachable
            let pid = self.processes[idx].pid();
            warn!(run_id = ?self.run_id, pid, "Finished process found in ready queue, skipping");
            return StepOutcome::Skipped { pid };
        }

        self.execute(idx)
    }

    /// Jump over an idle gap to the earliest pending arrival
    fn fast_forward(&mut self) -> StepOutcome {
        let next_arrival = self
            .processes
            .iter()
            .filter(|p| !p.is_finished() && !p.is_enqueued())
            .map(|p| p.arrival())
            .min();

        let Some(to) = next_arrival else {
            return StepOutcome::Complete;
        };

        let from = self.current_time;
        self.current_time = to.max(from);
        self.stats.idle_jumps += 1;
        self.stats.idle_time += self.current_time - from;

        let admitted = self.admit_arrivals();
        debug!(run_id = ?self.run_id, from, to = self.current_time, "CPU idle, time advanced");

        StepOutcome::Idle {
            from,
            to: self.current_time,
            admitted,
        }
    }

    /// Run the process at `idx` for at most one quantum
    fn execute(&mut self, idx: usize) -> StepOutcome {
        let used = self.quantum.ticks().min(self.processes[idx].remaining);

        // Everyone still queued waits for the whole slice
        let mut queued = Vec::with_capacity(self.ready_queue.len());
        for &other in &self.ready_queue {
            self.processes[other].waiting += used;
            queued.push(self.processes[other].pid());
        }

        let start = self.current_time;
        self.current_time += used;
        let now = self.current_time;

        let process = &mut self.processes[idx];
        process.remaining -= used;
        let pid = process.pid();

        let end = if process.remaining == 0 {
            let turnaround = now - process.arrival();
            process.turnaround = Some(turnaround);
            SliceEnd::Finished { turnaround }
        } else {
            SliceEnd::Preempted {
                remaining: process.remaining,
            }
        };

        let slice = Slice {
            pid,
            start,
            length: used,
            finished: matches!(end, SliceEnd::Finished { .. }),
        };
        self.gantt.push(slice);
        self.stats.slices += 1;
        self.stats.busy_time += used;

        match end {
            SliceEnd::Finished { turnaround } => {
                self.completed += 1;
                self.stats.completions += 1;
                debug!(run_id = ?self.run_id, pid, start, used, turnaround, "Process finished");
            }
            SliceEnd::Preempted { remaining } => {
                // Arrivals during the slice queue ahead of the preempted process
                self.admit_arrivals();
                self.ready_queue.push_back(idx);
                self.stats.preemptions += 1;
                debug!(run_id = ?self.run_id, pid, start, used, remaining, "Process preempted");
            }
        }

        let all_complete = self.completed == self.processes.len();
        if all_complete {
            info!(
                run_id = ?self.run_id,
                time = now,
                averages = %self.averages(),
                "All processes completed"
            );
        }

        StepOutcome::Ran {
            slice,
            end,
            queued,
            all_complete,
        }
    }
}
