/*!
 * Text Report
 * Step-by-step trace and final results table for terminal output
 */

use super::types::{Snapshot, StepOutcome};
use crate::core::types::Pid;
use std::fmt::Write;

pub const TRACE_HEADER: &str = "Interval\t| Executed Process | Ready Queue (during execution)";
pub const TRACE_RULE: &str = "-------------------------------------------------------------";

fn queue_text(pids: &[Pid]) -> String {
    if pids.is_empty() {
        return String::from("Empty");
    }
    pids.iter()
        .map(|pid| format!("P{}", pid))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trace line for one step, if it covered any simulated time
pub fn trace_line(outcome: &StepOutcome) -> Option<String> {
    match outcome {
        StepOutcome::Ran { slice, queued, .. } => Some(format!(
            "{:>3} - {:>3}\t|   P{:<3}           | {}",
            slice.start,
            slice.end(),
            slice.pid,
            queue_text(queued)
        )),
        StepOutcome::Idle { from, to, .. } if to > from => Some(format!(
            "{:>3} - {:>3}\t|   idle             | Empty",
            from, to
        )),
        _ => None,
    }
}

/// Final per-process results and averages
pub fn results_table(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "PID\tBurst\tArrival\tWaiting\tTurnaround");
    for row in &snapshot.processes {
        let turnaround = row
            .turnaround
            .map_or_else(|| String::from("-"), |t| t.to_string());
        let _ = writeln!(
            out,
            "P{}\t{:>5}\t{:>7}\t{:>7}\t{:>10}",
            row.pid, row.burst, row.arrival, row.waiting, turnaround
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Average Waiting Time    = {:.2}",
        snapshot.averages.waiting
    );
    let _ = writeln!(
        out,
        "Average Turnaround Time = {:.2}",
        snapshot.averages.turnaround
    );
    let _ = write!(
        out,
        "CPU Utilization         = {:.1}%",
        snapshot.stats.utilization() * 100.0
    );
    out
}
