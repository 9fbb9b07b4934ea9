/*!
 * Round-Robin Scheduling Simulator
 * Deterministic Round-Robin CPU scheduling engine with a paced controller
 */

pub mod controller;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::core::{Pid, Quantum, SimResult, SimulationConfig, SimulationError, Ticks};
pub use controller::{Player, Simulation, StepBroadcaster};
pub use monitoring::init_tracing;
pub use process::{Process, ProcessSpec, ProcessState, RawProcess, Workload};
pub use scheduler::{
    Averages, CpuState, GanttChart, ProcessRow, QueueEntry, Scheduler, SchedulerStats, Slice,
    SliceEnd, Snapshot, Step, StepOutcome,
};
