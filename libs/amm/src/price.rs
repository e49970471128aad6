//! Virtual price and marginal swap price

use crate::errors::Result;
use crate::scaling::compute_d_with_rates;
use crate::swap::calculate_estimated_swap_output_amount;
use num::{BigInt, ToPrimitive};
use stableswap_types::{ExchangeInfo, Fraction, Price, TokenAmount};
use tracing::debug;

/// Smallest probe swapped when deriving the swap price
pub const MIN_PRICE_PROBE: u64 = 10_000;

/// Invariant per LP token, `None` while no LP tokens exist
pub fn calculate_virtual_price(exchange: &ExchangeInfo) -> Result<Option<Fraction>> {
    if exchange.lp_total_supply.is_zero() {
        return Ok(None);
    }

    let [reserve_a, reserve_b] = &exchange.reserves;
    let d = compute_d_with_rates(
        exchange.amp_factor,
        &reserve_a.amount.to_big(),
        &reserve_b.amount.to_big(),
        &reserve_a.rate(),
        &reserve_b.rate(),
    )?;

    Ok(Some(Fraction::new(d, exchange.lp_total_supply.to_big())?))
}

/// Probe size: one whole token or 1% of the first reserve, whichever is
/// smaller, but never below [`MIN_PRICE_PROBE`]
pub fn price_probe_amount(exchange: &ExchangeInfo) -> TokenAmount {
    let reserve = &exchange.reserves[0].amount;
    let one_percent = BigInt::from(reserve.raw() / 100);
    let probe = reserve
        .token
        .one_unit()
        .min(one_percent)
        .max(BigInt::from(MIN_PRICE_PROBE));

    // Bounded by max(reserve / 100, MIN_PRICE_PROBE)
    TokenAmount::new(
        reserve.token.clone(),
        probe.to_u64().unwrap_or(MIN_PRICE_PROBE),
    )
}

/// Marginal price of the first reserve token in units of the second,
/// measured by simulating a small swap before fees
pub fn calculate_swap_price(exchange: &ExchangeInfo) -> Result<Price> {
    let input = price_probe_amount(exchange);
    let output = calculate_estimated_swap_output_amount(exchange, &input)?;

    let raw = output
        .output_amount_before_fees
        .as_fraction()
        .checked_div(&input.as_fraction())?;

    debug!(
        probe = input.raw(),
        output = output.output_amount_before_fees.raw(),
        "Swap price sampled"
    );

    Ok(Price::from_fraction(
        input.token,
        output.output_amount_before_fees.token,
        raw,
    ))
}
