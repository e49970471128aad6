//! Amplification coefficient ramping
//!
//! Pool admins move the amplification coefficient between two values over a
//! time window. The effective value at a given timestamp is what the pool
//! program uses, so quotes must resolve it before calling the calculators.

use crate::errors::{CalculatorError, Result};
use num::{BigInt, ToPrimitive};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Linear amplification ramp between two unix timestamps (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmpRamp {
    pub initial_amp_factor: u64,
    pub target_amp_factor: u64,
    pub start_ramp_ts: i64,
    pub stop_ramp_ts: i64,
}

impl AmpRamp {
    /// A ramp that never moves
    pub fn fixed(amp_factor: u64) -> Self {
        Self {
            initial_amp_factor: amp_factor,
            target_amp_factor: amp_factor,
            start_ramp_ts: 0,
            stop_ramp_ts: 0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.stop_ramp_ts < self.start_ramp_ts {
            return Err(CalculatorError::InvalidAmpRamp {
                start_ramp_ts: self.start_ramp_ts,
                stop_ramp_ts: self.stop_ramp_ts,
            });
        }
        Ok(())
    }
}

/// Effective amplification coefficient at `now`
///
/// Interpolation truncates toward the initial value, matching the pool
/// program's integer arithmetic.
pub fn compute_amp_factor(ramp: &AmpRamp, now: i64) -> Result<u64> {
    ramp.validate()?;

    if now >= ramp.stop_ramp_ts {
        return Ok(ramp.target_amp_factor);
    }
    if now <= ramp.start_ramp_ts {
        return Ok(ramp.initial_amp_factor);
    }

    // start < now < stop, so the range is positive
    let time_range = BigInt::from(ramp.stop_ramp_ts) - BigInt::from(ramp.start_ramp_ts);
    let time_delta = BigInt::from(now) - BigInt::from(ramp.start_ramp_ts);
    let initial = BigInt::from(ramp.initial_amp_factor);
    let target = BigInt::from(ramp.target_amp_factor);

    let amp = if target >= initial {
        &initial + (&target - &initial) * time_delta / time_range
    } else {
        &initial - (&initial - &target) * time_delta / time_range
    };

    trace!(now, amp = %amp, "Amp factor interpolated");

    // Always between initial and target
    amp.to_u64()
        .ok_or_else(|| CalculatorError::degenerate("amp interpolation"))
}
