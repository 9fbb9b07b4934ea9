/*!
 * Simulation Configuration
 * Time quantum and presentation pacing
 */

use super::errors::SimulationError;
use super::limits::{
    DEFAULT_QUANTUM, DEFAULT_SPEED, ENV_QUANTUM, ENV_SPEED_MS, MIN_QUANTUM, MIN_SPEED,
};
use super::types::{SimResult, Ticks};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

/// Maximum CPU time granted to a process per scheduling turn
///
/// Always at least one tick; fixed for the lifetime of a run.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantum(Ticks);

impl Quantum {
    /// Create a quantum, rejecting values below one tick
    pub fn new(ticks: i64) -> SimResult<Self> {
        if ticks < MIN_QUANTUM as i64 {
            return Err(SimulationError::InvalidQuantum(ticks));
        }
        Ok(Self(ticks as Ticks))
    }

    /// Lenient form-field parsing
    ///
    /// Unparsable or zero input falls back to the default quantum; anything
    /// else is clamped to at least one tick.
    pub fn from_input(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(0) | Err(_) => Self(DEFAULT_QUANTUM),
            Ok(v) => Self(v.max(MIN_QUANTUM as i64) as Ticks),
        }
    }

    #[inline(always)]
    pub const fn ticks(&self) -> Ticks {
        self.0
    }
}

impl Default for Quantum {
    fn default() -> Self {
        Self(DEFAULT_QUANTUM)
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Quantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = i64::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}

/// Parse a pacing value in milliseconds with form semantics
fn speed_from_input(input: &str) -> Duration {
    match input.trim().parse::<i64>() {
        Ok(0) | Err(_) => DEFAULT_SPEED,
        Ok(ms) => Duration::from_millis(ms.max(0) as u64).max(MIN_SPEED),
    }
}

/// Run configuration: quantum plus visualization pacing
///
/// `speed` is wall-clock time per tick of CPU time while playing. It only
/// affects presentation; scheduling outcomes are identical at any speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub quantum: Quantum,
    pub speed: Duration,
}

impl SimulationConfig {
    pub fn new(quantum: Quantum) -> Self {
        Self {
            quantum,
            speed: DEFAULT_SPEED,
        }
    }

    /// Build from raw form fields
    pub fn from_input(quantum: &str, speed_ms: &str) -> Self {
        Self {
            quantum: Quantum::from_input(quantum),
            speed: speed_from_input(speed_ms),
        }
    }

    /// Defaults overridden by `RRSIM_QUANTUM` and `RRSIM_SPEED_MS`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(ENV_QUANTUM) {
            config.quantum = Quantum::from_input(&value);
        }
        if let Ok(value) = std::env::var(ENV_SPEED_MS) {
            config.speed = speed_from_input(&value);
        }
        config
    }

    pub fn with_quantum(mut self, quantum: Quantum) -> Self {
        self.quantum = quantum;
        self
    }

    /// Set pacing, clamped to the minimum speed
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed.max(MIN_SPEED);
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(Quantum::default())
    }
}
