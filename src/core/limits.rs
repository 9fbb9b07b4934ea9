/*!
 * Simulation Limits and Defaults
 *
 * Centralized location for defaults and thresholds used by the loader,
 * the configuration layer and the play controller.
 */

use std::time::Duration;

// =============================================================================
// SCHEDULING
// =============================================================================

/// Quantum used when the supplied value cannot be parsed
pub const DEFAULT_QUANTUM: u64 = 2;

/// Smallest quantum the engine accepts
pub const MIN_QUANTUM: u64 = 1;

/// Smallest burst a process may declare
pub const MIN_BURST: i64 = 1;

/// Smallest arrival time a process may declare
pub const MIN_ARRIVAL: i64 = 0;

/// Largest burst a process may declare
///
/// Pids are `u32`, so at most `u32::MAX` processes each bounded by these
/// limits keep every clock value, waiting total and slice end within `u64`.
pub const MAX_BURST: i64 = u32::MAX as i64;

/// Largest arrival time a process may declare
pub const MAX_ARRIVAL: i64 = u32::MAX as i64;

// =============================================================================
// PACING (presentation only, never affects scheduling outcomes)
// =============================================================================

/// Wall-clock time spent per tick of CPU time while playing
pub const DEFAULT_SPEED: Duration = Duration::from_millis(650);

/// Lower bound on per-tick pacing
pub const MIN_SPEED: Duration = Duration::from_millis(100);

/// Pause between consecutive steps while playing
pub const PLAY_STEP_GAP: Duration = Duration::from_millis(100);

// =============================================================================
// CHANNELS
// =============================================================================

/// Buffered steps per snapshot subscriber before lagging ones drop old entries
pub const SNAPSHOT_CHANNEL_CAPACITY: usize = 256;

// =============================================================================
// ENVIRONMENT
// =============================================================================

pub const ENV_QUANTUM: &str = "RRSIM_QUANTUM";
pub const ENV_SPEED_MS: &str = "RRSIM_SPEED_MS";
pub const ENV_TRACE_JSON: &str = "RRSIM_TRACE_JSON";
pub const ENV_PLAY: &str = "RRSIM_PLAY";
