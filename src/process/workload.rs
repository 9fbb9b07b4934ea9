/*!
 * Workload Loading
 * A validated process set plus the quantum it runs under
 */

use super::types::{ProcessSpec, RawProcess};
use super::validation::{parse_process, validate_processes};
use crate::core::config::Quantum;
use crate::core::types::{Pid, SimResult};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// On-disk / wire form of a workload
#[derive(Debug, Deserialize)]
struct WorkloadFile {
    #[serde(default)]
    quantum: Quantum,
    processes: Vec<RawProcess>,
}

/// Validated input to the scheduling engine
///
/// Holding a `Workload` means every precondition the engine relies on has
/// been checked: at least one process, burst >= 1, arrival >= 0, quantum >= 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    quantum: Quantum,
    processes: Vec<ProcessSpec>,
}

impl Workload {
    /// Validate raw rows under the given quantum
    pub fn new<I>(quantum: Quantum, raws: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = RawProcess>,
    {
        let processes = validate_processes(raws)?;
        Ok(Self { quantum, processes })
    }

    /// Convenience constructor from `(burst, arrival)` pairs
    pub fn from_pairs(quantum: Quantum, pairs: &[(i64, i64)]) -> SimResult<Self> {
        Self::new(
            quantum,
            pairs
                .iter()
                .map(|&(burst, arrival)| RawProcess::new(burst, arrival)),
        )
    }

    /// Build from form rows of `(burst, arrival)` text
    pub fn from_rows(quantum: Quantum, rows: &[(&str, &str)]) -> SimResult<Self> {
        let raws = rows
            .iter()
            .enumerate()
            .map(|(i, (burst, arrival))| parse_process(i as Pid + 1, burst, arrival))
            .collect::<SimResult<Vec<_>>>()?;
        Self::new(quantum, raws)
    }

    /// Parse a JSON workload: `{"quantum": 2, "processes": [{"burst": 5, "arrival": 0}]}`
    pub fn from_json(json: &str) -> SimResult<Self> {
        let file: WorkloadFile = serde_json::from_str(json)?;
        Self::new(file.quantum, file.processes)
    }

    /// Read and parse a JSON workload file
    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading workload file");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Three processes with staggered arrivals under quantum 2
    pub fn sample() -> Self {
        Self {
            quantum: Quantum::default(),
            processes: vec![
                ProcessSpec::new(1, 5, 0),
                ProcessSpec::new(2, 3, 1),
                ProcessSpec::new(3, 1, 2),
            ],
        }
    }

    /// Same process set under a different quantum
    pub fn with_quantum(mut self, quantum: Quantum) -> Self {
        self.quantum = quantum;
        self
    }

    #[inline]
    pub fn quantum(&self) -> Quantum {
        self.quantum
    }

    #[inline]
    pub fn processes(&self) -> &[ProcessSpec] {
        &self.processes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
