//! Withdrawal estimation: balanced burn and single-asset burn

use crate::curve::{compute_d, compute_y};
use crate::errors::{CalculatorError, Result};
use crate::fees::{pool_trade_fee, FeeSplit};
use crate::scaling::{descale, scale};
use num::{BigInt, Zero};
use serde::Serialize;
use stableswap_types::{ExchangeInfo, Fraction, Token, TokenAmount};
use tracing::debug;

/// Balanced withdrawal quote, one entry per reserve in pool order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawEstimate {
    pub withdraw_amounts: [TokenAmount; 2],
    pub withdraw_amounts_before_fees: [TokenAmount; 2],
    pub fees: [TokenAmount; 2],
}

/// Estimate both reserve amounts received for burning `pool_token_amount`
///
/// Each reserve yields `share * balance` minus the withdraw fee. The
/// withdrawn amount is `trunc(base - fee)` and the reported fee is the
/// difference to `trunc(base)`, so `withdraw + fee == before_fees` per reserve.
pub fn calculate_estimated_withdraw_amount(
    exchange: &ExchangeInfo,
    pool_token_amount: &TokenAmount,
) -> Result<WithdrawEstimate> {
    exchange.lp_token().ensure_same(&pool_token_amount.token)?;

    let zeros = || {
        exchange
            .reserves
            .each_ref()
            .map(|reserve| TokenAmount::zero(reserve.token().clone()))
    };

    if exchange.lp_total_supply.is_zero() || pool_token_amount.is_zero() {
        debug!(
            lp_total_supply = exchange.lp_total_supply.raw(),
            pool_tokens = pool_token_amount.raw(),
            "Nothing to withdraw"
        );
        return Ok(WithdrawEstimate {
            withdraw_amounts: zeros(),
            withdraw_amounts_before_fees: zeros(),
            fees: zeros(),
        });
    }

    CalculatorError::ensure_burnable(pool_token_amount, &exchange.lp_total_supply)?;

    let share = pool_token_amount
        .as_fraction()
        .checked_div(&exchange.lp_total_supply.as_fraction())?;

    let mut withdraw_amounts = zeros();
    let mut withdraw_amounts_before_fees = zeros();
    let mut fees = zeros();

    for (i, reserve) in exchange.reserves.iter().enumerate() {
        let token = reserve.token().clone();
        let base_amount = &share * &reserve.amount.as_fraction();
        let fee = &base_amount * &exchange.fees.withdraw;

        let withdraw = TokenAmount::from_fraction(token.clone(), &(&base_amount - &fee))?;
        let before_fees = TokenAmount::from_fraction(token, &base_amount)?;
        // Reported as the difference rather than trunc(fee) so that
        // withdraw + fee == before_fees; this can exceed trunc(fee) by one
        fees[i] = before_fees.checked_sub(&withdraw)?;
        withdraw_amounts[i] = withdraw;
        withdraw_amounts_before_fees[i] = before_fees;
    }

    debug!(
        pool_tokens = pool_token_amount.raw(),
        amount_a = withdraw_amounts[0].raw(),
        amount_b = withdraw_amounts[1].raw(),
        "Balanced withdrawal estimated"
    );

    Ok(WithdrawEstimate {
        withdraw_amounts,
        withdraw_amounts_before_fees,
        fees,
    })
}

/// Single-asset withdrawal quote, every amount in the withdrawn token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawOneEstimate {
    pub withdraw_amount: TokenAmount,
    pub withdraw_amount_before_fees: TokenAmount,
    pub swap_fee: TokenAmount,
    pub withdraw_fee: TokenAmount,
    pub lp_swap_fee: TokenAmount,
    pub lp_withdraw_fee: TokenAmount,
    pub admin_swap_fee: TokenAmount,
    pub admin_withdraw_fee: TokenAmount,
}

impl WithdrawOneEstimate {
    fn zero(token: &Token) -> Self {
        let zero = TokenAmount::zero(token.clone());
        Self {
            withdraw_amount: zero.clone(),
            withdraw_amount_before_fees: zero.clone(),
            swap_fee: zero.clone(),
            withdraw_fee: zero.clone(),
            lp_swap_fee: zero.clone(),
            lp_withdraw_fee: zero.clone(),
            admin_swap_fee: zero.clone(),
            admin_withdraw_fee: zero,
        }
    }
}

/// Estimate the amount of `withdraw_token` received for burning
/// `pool_token_amount` into a single reserve
///
/// The burn lowers the invariant from `d0` to `d1`; the imbalance this
/// creates is charged the normalized trade fee on both sides, and the
/// withdraw fee is charged on what remains.
pub fn calculate_estimated_withdraw_one_amount(
    exchange: &ExchangeInfo,
    pool_token_amount: &TokenAmount,
    withdraw_token: &Token,
) -> Result<WithdrawOneEstimate> {
    exchange.lp_token().ensure_same(&pool_token_amount.token)?;
    let base_side = exchange.side_of(withdraw_token)?;

    if pool_token_amount.is_zero() {
        debug!(side = ?base_side, "Zero pool tokens, skipping solver");
        return Ok(WithdrawOneEstimate::zero(withdraw_token));
    }

    let amp = exchange.amp_factor;
    let fees = &exchange.fees;
    let base_reserve = exchange.reserve(base_side);
    let quote_reserve = exchange.reserve(base_side.other());
    let base_rate = base_reserve.rate();
    let quote_rate = quote_reserve.rate();

    let base_balance = scale(&base_reserve.amount.to_big(), &base_rate);
    let quote_balance = scale(&quote_reserve.amount.to_big(), &quote_rate);
    let lp_supply = exchange.lp_total_supply.to_big();
    if lp_supply.is_zero() {
        return Err(CalculatorError::degenerate("withdraw_one lp supply"));
    }
    CalculatorError::ensure_burnable(pool_token_amount, &exchange.lp_total_supply)?;

    let d_0 = compute_d(amp, &base_balance, &quote_balance)?;
    if d_0.is_zero() {
        return Err(CalculatorError::degenerate("withdraw_one invariant"));
    }
    let d_1 = &d_0 - (pool_token_amount.to_big() * &d_0) / &lp_supply;

    let new_y = compute_y(amp, &quote_balance, &d_1)?;

    // Deviation of each side from a proportional burn
    let expected_base_amount = (&base_balance * &d_1) / &d_0 - &new_y;
    let expected_quote_amount = &quote_balance - (&quote_balance * &d_1) / &d_0;

    let new_base_amount =
        Fraction::from(base_balance.clone()) - pool_trade_fee(fees, &expected_base_amount)?;
    let new_quote_amount =
        Fraction::from(quote_balance) - pool_trade_fee(fees, &expected_quote_amount)?;

    let dy = &new_base_amount - &compute_y(amp, &new_quote_amount.truncate(), &d_1)?;
    let dy_0: BigInt = base_balance - new_y;

    let swap_fee = descale(&(Fraction::from(dy_0) - &dy), &base_rate)?;
    let dy = descale(&dy, &base_rate)?;
    let withdraw_fee = &dy * &fees.withdraw;
    let withdraw_amount = &(&dy - &withdraw_fee) - &swap_fee;

    let swap_fee = FeeSplit::new(withdraw_token, &swap_fee, &fees.admin_trade)?;
    let withdraw_fee = FeeSplit::new(withdraw_token, &withdraw_fee, &fees.admin_withdraw)?;

    let estimate = WithdrawOneEstimate {
        withdraw_amount: TokenAmount::from_fraction(withdraw_token.clone(), &withdraw_amount)?,
        withdraw_amount_before_fees: TokenAmount::from_fraction(withdraw_token.clone(), &dy)?,
        swap_fee: swap_fee.total,
        withdraw_fee: withdraw_fee.total,
        lp_swap_fee: swap_fee.lp,
        lp_withdraw_fee: withdraw_fee.lp,
        admin_swap_fee: swap_fee.admin,
        admin_withdraw_fee: withdraw_fee.admin,
    };

    debug!(
        side = ?base_side,
        pool_tokens = pool_token_amount.raw(),
        withdraw = estimate.withdraw_amount.raw(),
        swap_fee = estimate.swap_fee.raw(),
        withdraw_fee = estimate.withdraw_fee.raw(),
        "Single-asset withdrawal estimated"
    );

    Ok(estimate)
}
