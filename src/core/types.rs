/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (1-based, assigned by input order)
pub type Pid = u32;

/// Simulation time and CPU time, in abstract ticks
pub type Ticks = u64;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimulationError>;
