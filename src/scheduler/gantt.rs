/*!
 * Gantt Chart History
 * Ordered record of every execution slice in the current run
 */

use super::types::Slice;
use crate::core::types::{Pid, Ticks};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GanttChart {
    slices: Vec<Slice>,
}

impl GanttChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn push(&mut self, slice: Slice) {
        debug_assert!(self
            .slices
            .last()
            .map_or(true, |prev| prev.end() <= slice.start));
        self.slices.push(slice);
    }

    pub(super) fn clear(&mut self) {
        self.slices.clear();
    }

    #[inline]
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Timeline tick labels, one per block boundary
    ///
    /// Built by accumulating slice lengths from zero, so idle gaps between
    /// slices are collapsed. `Slice::start` keeps the true position.
    pub fn ticks(&self) -> Vec<Ticks> {
        let mut ticks = Vec::with_capacity(self.slices.len() + 1);
        let mut current = 0;
        ticks.push(current);
        for slice in &self.slices {
            current += slice.length;
            ticks.push(current);
        }
        ticks
    }

    /// Total CPU time recorded
    pub fn busy_time(&self) -> Ticks {
        self.slices.iter().map(|s| s.length).sum()
    }

    /// Slices belonging to one process, in execution order
    pub fn slices_for(&self, pid: Pid) -> impl Iterator<Item = &Slice> + '_ {
        self.slices.iter().filter(move |s| s.pid == pid)
    }

    /// Single-line chart, e.g. `| P1 | P2 | P1 |`
    pub fn render_blocks(&self) -> String {
        if self.slices.is_empty() {
            return String::from("|");
        }
        let mut out = String::from("|");
        for slice in &self.slices {
            out.push_str(&format!(" P{:<width$}|", slice.pid, width = block_width(slice)));
        }
        out
    }

    /// Tick labels aligned under `render_blocks`
    pub fn render_ticks(&self) -> String {
        let mut out = String::new();
        let ticks = self.ticks();
        for (slice, tick) in self.slices.iter().zip(&ticks) {
            // block is "| P" + pid column
            let width = block_width(slice) + 3;
            out.push_str(&format!("{:<width$}", tick, width = width));
        }
        if let Some(last) = ticks.last() {
            out.push_str(&last.to_string());
        }
        out
    }
}

/// Pid column width; longer slices get wider blocks
fn block_width(slice: &Slice) -> usize {
    (slice.length as usize * 2).clamp(3, 24)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(pid: Pid, start: Ticks, length: Ticks, finished: bool) -> Slice {
        Slice {
            pid,
            start,
            length,
            finished,
        }
    }

    #[test]
    fn test_ticks_are_cumulative() {
        let mut chart = GanttChart::new();
        assert_eq!(chart.ticks(), vec![0]);

        chart.push(slice(1, 0, 2, false));
        chart.push(slice(2, 2, 2, false));
        chart.push(slice(3, 4, 1, true));
        assert_eq!(chart.ticks(), vec![0, 2, 4, 5]);
        assert_eq!(chart.busy_time(), 5);
    }

    #[test]
    fn test_ticks_collapse_idle_gaps() {
        let mut chart = GanttChart::new();
        chart.push(slice(1, 0, 1, true));
        chart.push(slice(2, 5, 2, true));
        assert_eq!(chart.ticks(), vec![0, 1, 3]);
        assert_eq!(chart.slices()[1].end(), 7);
    }

    #[test]
    fn test_slices_for_pid() {
        let mut chart = GanttChart::new();
        chart.push(slice(1, 0, 2, false));
        chart.push(slice(2, 2, 1, true));
        chart.push(slice(1, 3, 1, true));

        let starts: Vec<Ticks> = chart.slices_for(1).map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 3]);
    }

    #[test]
    fn test_render_blocks() {
        let mut chart = GanttChart::new();
        assert_eq!(chart.render_blocks(), "|");
        chart.push(slice(1, 0, 1, true));
        assert_eq!(chart.render_blocks(), "| P1  |");
        assert_eq!(chart.render_ticks(), "0     1");
    }
}
