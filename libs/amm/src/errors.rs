//! Calculator error taxonomy
//!
//! All failures are fatal to the call that raised them. Nothing here is
//! retried: the calculators do no I/O, so a repeated call with the same
//! inputs fails the same way.

use num::BigInt;
use stableswap_types::{AmountError, TokenAmount};
use thiserror::Error;

pub type Result<T, E = CalculatorError> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    /// Post-deposit invariant below the pre-deposit invariant
    #[error("Invalid deposit: new invariant {d1} is below previous invariant {d0}")]
    InvalidDeposit { d0: BigInt, d1: BigInt },

    /// Zero denominator reached from degenerate pool state
    #[error("Degenerate arithmetic: zero denominator in {context}")]
    ArithmeticDegenerate { context: &'static str },

    /// More LP tokens burned than are outstanding
    #[error("Burn of {burn} pool tokens exceeds LP supply {supply}")]
    BurnExceedsSupply { burn: u64, supply: u64 },

    /// Amplification ramp ends before it starts
    #[error("Invalid amp ramp: stop {stop_ramp_ts} precedes start {start_ramp_ts}")]
    InvalidAmpRamp { start_ramp_ts: i64, stop_ramp_ts: i64 },

    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl CalculatorError {
    pub(crate) fn degenerate(context: &'static str) -> Self {
        Self::ArithmeticDegenerate { context }
    }

    /// Fail unless `burn` fits within `supply`
    pub(crate) fn ensure_burnable(burn: &TokenAmount, supply: &TokenAmount) -> Result<()> {
        if burn.raw() > supply.raw() {
            return Err(Self::BurnExceedsSupply {
                burn: burn.raw(),
                supply: supply.raw(),
            });
        }
        Ok(())
    }
}
