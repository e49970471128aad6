//! Deposit estimation (LP tokens minted)

use crate::curve::compute_d;
use crate::errors::{CalculatorError, Result};
use crate::fees::pool_trade_fee;
use crate::scaling::scale;
use num::{BigInt, Zero};
use serde::Serialize;
use stableswap_types::{ExchangeInfo, Fraction, TokenAmount};
use tracing::{debug, warn};

/// Mint quote, every amount in the LP token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintEstimate {
    pub mint_amount: TokenAmount,
    pub mint_amount_before_fees: TokenAmount,
    pub fees: TokenAmount,
}

/// Estimate LP tokens minted for depositing `deposit_amount_a` of the first
/// reserve and `deposit_amount_b` of the second
///
/// Imbalanced deposits pay the normalized trade fee on each side's distance
/// from the balance a proportional deposit would have produced.
pub fn calculate_estimated_mint_amount(
    exchange: &ExchangeInfo,
    deposit_amount_a: &TokenAmount,
    deposit_amount_b: &TokenAmount,
) -> Result<MintEstimate> {
    let [reserve_a, reserve_b] = &exchange.reserves;
    reserve_a.token().ensure_same(&deposit_amount_a.token)?;
    reserve_b.token().ensure_same(&deposit_amount_b.token)?;

    let lp_token = exchange.lp_token();
    if deposit_amount_a.is_zero() && deposit_amount_b.is_zero() {
        debug!("Zero deposit, skipping solver");
        let zero = TokenAmount::zero(lp_token.clone());
        return Ok(MintEstimate {
            mint_amount: zero.clone(),
            mint_amount_before_fees: zero.clone(),
            fees: zero,
        });
    }

    let amp = exchange.amp_factor;
    let rates = [reserve_a.rate(), reserve_b.rate()];

    let old_balances = [
        scale(&reserve_a.amount.to_big(), &rates[0]),
        scale(&reserve_b.amount.to_big(), &rates[1]),
    ];
    let new_balances = [
        scale(
            &(reserve_a.amount.to_big() + deposit_amount_a.to_big()),
            &rates[0],
        ),
        scale(
            &(reserve_b.amount.to_big() + deposit_amount_b.to_big()),
            &rates[1],
        ),
    ];

    let d_0 = compute_d(amp, &old_balances[0], &old_balances[1])?;
    let d_1 = compute_d(amp, &new_balances[0], &new_balances[1])?;

    if d_1 < d_0 {
        warn!(d0 = %d_0, d1 = %d_1, "Deposit would decrease the invariant");
        return Err(CalculatorError::InvalidDeposit { d0: d_0, d1: d_1 });
    }

    let growth = Fraction::new(d_1.clone(), d_0.clone())
        .map_err(|_| CalculatorError::degenerate("deposit invariant"))?;

    let mut adjusted_balances = [BigInt::zero(), BigInt::zero()];
    for (i, (old_balance, new_balance)) in old_balances.iter().zip(&new_balances).enumerate() {
        let ideal_balance = &growth * old_balance;
        let difference = (&ideal_balance - new_balance).abs();
        let fee = pool_trade_fee(&exchange.fees, &difference.truncate())?;
        adjusted_balances[i] = new_balance - fee.truncate();
    }

    let d_2 = compute_d(amp, &adjusted_balances[0], &adjusted_balances[1])?;

    let lp_supply = exchange.lp_total_supply.to_big();
    let mint_raw = (&lp_supply * (&d_2 - &d_0)) / &d_0;
    let mint_raw_before_fees = (&lp_supply * (&d_1 - &d_0)) / &d_0;

    let mint_amount = TokenAmount::from_big(lp_token.clone(), &mint_raw)?;
    let mint_amount_before_fees = TokenAmount::from_big(lp_token.clone(), &mint_raw_before_fees)?;
    let fees = mint_amount_before_fees.checked_sub(&mint_amount)?;

    debug!(
        deposit_a = deposit_amount_a.raw(),
        deposit_b = deposit_amount_b.raw(),
        mint = mint_amount.raw(),
        fees = fees.raw(),
        "Mint estimated"
    );

    Ok(MintEstimate {
        mint_amount,
        mint_amount_before_fees,
        fees,
    })
}
