//! Swap output estimation
//!
//! Quotes the output of a direct swap the way the pool program executes it:
//! solve the new output balance on the curve, then charge the trade fee on
//! the output side. The result feeds minimum-output guards of swap
//! instructions.

use crate::curve::{compute_d, compute_y};
use crate::errors::Result;
use crate::fees::FeeSplit;
use crate::scaling::{descale, scale};
use serde::Serialize;
use stableswap_types::{ExchangeInfo, Fraction, TokenAmount};
use tracing::debug;

/// Swap quote, every amount in the output token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapEstimate {
    /// Curve output before the trade fee
    pub output_amount_before_fees: TokenAmount,
    /// Amount the user receives
    pub output_amount: TokenAmount,
    /// Total trade fee
    pub fee: TokenAmount,
    /// Share of the fee left to liquidity providers
    pub lp_fee: TokenAmount,
    /// Share of the fee sent to the admin fee account
    pub admin_fee: TokenAmount,
}

/// Estimate the output of swapping `from_amount` into the other reserve
///
/// Guarantees `output_amount + fee == output_amount_before_fees` and
/// `lp_fee + admin_fee == fee`.
pub fn calculate_estimated_swap_output_amount(
    exchange: &ExchangeInfo,
    from_amount: &TokenAmount,
) -> Result<SwapEstimate> {
    let from_side = exchange.side_of(&from_amount.token)?;
    let from_reserve = exchange.reserve(from_side);
    let to_reserve = exchange.reserve(from_side.other());
    let to_token = to_reserve.token();

    if from_amount.is_zero() {
        debug!(side = ?from_side, "Zero swap input, skipping solver");
        let zero = TokenAmount::zero(to_token.clone());
        return Ok(SwapEstimate {
            output_amount_before_fees: zero.clone(),
            output_amount: zero.clone(),
            fee: zero.clone(),
            lp_fee: zero.clone(),
            admin_fee: zero,
        });
    }

    let from_rate = from_reserve.rate();
    let to_rate = to_reserve.rate();

    let from_balance = scale(&from_reserve.amount.to_big(), &from_rate);
    let to_balance = scale(&to_reserve.amount.to_big(), &to_rate);
    let new_from_balance = scale(
        &(from_reserve.amount.to_big() + from_amount.to_big()),
        &from_rate,
    );

    let d = compute_d(exchange.amp_factor, &from_balance, &to_balance)?;
    let new_to_balance = compute_y(exchange.amp_factor, &new_from_balance, &d)?;

    let amount_before_fees = descale(&Fraction::from(to_balance - new_to_balance), &to_rate)?;
    let output_amount_before_fees =
        TokenAmount::from_fraction(to_token.clone(), &amount_before_fees)?;

    let fee = FeeSplit::new(
        to_token,
        &(&amount_before_fees * &exchange.fees.trade),
        &exchange.fees.admin_trade,
    )?;
    let output_amount = output_amount_before_fees.checked_sub(&fee.total)?;

    debug!(
        side = ?from_side,
        input = from_amount.raw(),
        output = output_amount.raw(),
        fee = fee.total.raw(),
        "Swap estimated"
    );

    Ok(SwapEstimate {
        output_amount_before_fees,
        output_amount,
        fee: fee.total,
        lp_fee: fee.lp,
        admin_fee: fee.admin,
    })
}
