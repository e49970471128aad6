//! Exchange-rate scaling around the solvers
//!
//! Balances are multiplied by their reserve's exchange rate and truncated
//! before they reach [`compute_d`](crate::compute_d) or
//! [`compute_y`](crate::compute_y); solver outputs are divided by the rate of
//! the side they belong to.

use crate::curve::compute_d;
use crate::errors::Result;
use num::BigInt;
use stableswap_types::Fraction;

/// `trunc(amount * rate)`
pub fn scale(amount: &BigInt, rate: &Fraction) -> BigInt {
    (&Fraction::from(amount.clone()) * rate).truncate()
}

/// `amount / rate`, exact
pub fn descale(amount: &Fraction, rate: &Fraction) -> Result<Fraction> {
    Ok(amount.checked_div(rate)?)
}

/// Invariant over two native balances with their exchange rates applied
pub fn compute_d_with_rates(
    amp_factor: u64,
    amount_a: &BigInt,
    amount_b: &BigInt,
    rate_a: &Fraction,
    rate_b: &Fraction,
) -> Result<BigInt> {
    compute_d(amp_factor, &scale(amount_a, rate_a), &scale(amount_b, rate_b))
}
