/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Input field of a process row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProcessField {
    Burst,
    Arrival,
}

impl fmt::Display for ProcessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Burst => f.write_str("burst"),
            Self::Arrival => f.write_str("arrival"),
        }
    }
}

/// Simulator errors with serialization support
///
/// Only the loader and the controller produce these. The scheduling engine
/// reports logical no-ops as step outcomes instead.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimulationError {
    #[error("Invalid number of processes: {0}")]
    #[diagnostic(
        code(loader::invalid_process_count),
        help("At least one process is required.")
    )]
    InvalidProcessCount(usize),

    #[error("Check process {index} input: {field} '{value}' is not an integer")]
    #[diagnostic(
        code(loader::not_an_integer),
        help("Burst and arrival must be whole numbers.")
    )]
    NotAnInteger {
        index: Pid,
        field: ProcessField,
        value: String,
    },

    #[error("Check process {index} input: burst {burst} is below 1")]
    #[diagnostic(
        code(loader::invalid_burst),
        help("Every process needs at least one tick of CPU time.")
    )]
    InvalidBurst { index: Pid, burst: i64 },

    #[error("Check process {index} input: arrival {arrival} is negative")]
    #[diagnostic(
        code(loader::invalid_arrival),
        help("Arrival times start at 0.")
    )]
    InvalidArrival { index: Pid, arrival: i64 },

    #[error("Check process {index} input: {field} {value} exceeds the maximum of {max}")]
    #[diagnostic(
        code(loader::value_too_large),
        help("Burst and arrival are limited to 4294967295 ticks.")
    )]
    ValueTooLarge {
        index: Pid,
        field: ProcessField,
        value: i64,
        max: i64,
    },

    #[error("Invalid quantum: {0}")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("The time quantum must be at least 1 tick.")
    )]
    InvalidQuantum(i64),

    #[error("Malformed workload: {0}")]
    #[diagnostic(
        code(loader::parse_error),
        help("Expected a JSON object with a quantum and a list of processes.")
    )]
    Parse(String),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(loader::io_error),
        help("Check that the workload file exists and is readable.")
    )]
    Io(String),

    #[error("No processes loaded")]
    #[diagnostic(
        code(controller::nothing_loaded),
        help("Load processes first.")
    )]
    NothingLoaded,

    #[error("Simulation is playing")]
    #[diagnostic(
        code(controller::busy),
        help("Stop playback before stepping manually or loading a new workload.")
    )]
    Busy,
}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        SimulationError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::Parse(err.to_string())
    }
}
