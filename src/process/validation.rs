/*!
 * Process Input Validation
 * Rejects malformed process rows before any engine state exists
 */

use super::types::{ProcessSpec, RawProcess};
use crate::core::errors::{ProcessField, SimulationError};
use crate::core::limits::{MAX_ARRIVAL, MAX_BURST, MIN_ARRIVAL, MIN_BURST};
use crate::core::types::{Pid, SimResult, Ticks};

/// Parse one text field strictly as an integer
fn parse_field(index: Pid, field: ProcessField, value: &str) -> SimResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| SimulationError::NotAnInteger {
            index,
            field,
            value: value.to_string(),
        })
}

/// Parse a form row (`burst`, `arrival` as entered) into a raw process
pub fn parse_process(index: Pid, burst: &str, arrival: &str) -> SimResult<RawProcess> {
    Ok(RawProcess::new(
        parse_field(index, ProcessField::Burst, burst)?,
        parse_field(index, ProcessField::Arrival, arrival)?,
    ))
}

/// Validate one row and assign its pid
pub fn validate_process(index: Pid, raw: RawProcess) -> SimResult<ProcessSpec> {
    if raw.burst < MIN_BURST {
        return Err(SimulationError::InvalidBurst {
            index,
            burst: raw.burst,
        });
    }
    if raw.arrival < MIN_ARRIVAL {
        return Err(SimulationError::InvalidArrival {
            index,
            arrival: raw.arrival,
        });
    }
    if raw.burst > MAX_BURST {
        return Err(SimulationError::ValueTooLarge {
            index,
            field: ProcessField::Burst,
            value: raw.burst,
            max: MAX_BURST,
        });
    }
    if raw.arrival > MAX_ARRIVAL {
        return Err(SimulationError::ValueTooLarge {
            index,
            field: ProcessField::Arrival,
            value: raw.arrival,
            max: MAX_ARRIVAL,
        });
    }
    Ok(ProcessSpec::new(index, raw.burst as Ticks, raw.arrival as Ticks))
}

/// Validate a whole process set; pids are assigned 1..=N in input order
///
/// Fails on the first offending row, producing no partial result.
pub fn validate_processes<I>(raws: I) -> SimResult<Vec<ProcessSpec>>
where
    I: IntoIterator<Item = RawProcess>,
{
    let specs = raws
        .into_iter()
        .enumerate()
        .map(|(i, raw)| validate_process(i as Pid + 1, raw))
        .collect::<SimResult<Vec<_>>>()?;

    if specs.is_empty() {
        return Err(SimulationError::InvalidProcessCount(0));
    }
    Ok(specs)
}
