//! Fee normalization and admin/LP fee splitting

use crate::errors::{CalculatorError, Result};
use num::{BigInt, One};
use serde::Serialize;
use stableswap_types::{Fraction, Fees, Token, TokenAmount, N_COINS};

/// Imbalance fee for `amount` when depositing or withdrawing
///
/// `amount * trade * n / ((n - 1) * 4)`, kept exact. For two coins the
/// multiplier is one half of the direct swap fee. Fewer than two coins has
/// no imbalance to charge and is rejected as degenerate.
pub fn normalized_trade_fee(fees: &Fees, n_coins: u8, amount: &BigInt) -> Result<Fraction> {
    let n_coins = BigInt::from(n_coins);
    let adjusted = Fraction::new(n_coins.clone(), (n_coins - BigInt::one()) * BigInt::from(4u8))
        .map_err(|_| CalculatorError::degenerate("normalized trade fee"))?;
    Ok(&(&Fraction::from(amount.clone()) * &fees.trade) * &adjusted)
}

/// Two-coin shorthand for [`normalized_trade_fee`]
pub fn pool_trade_fee(fees: &Fees, amount: &BigInt) -> Result<Fraction> {
    normalized_trade_fee(fees, N_COINS, amount)
}

/// Integer fee broken down into the admin and LP shares
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeSplit {
    pub total: TokenAmount,
    pub lp: TokenAmount,
    pub admin: TokenAmount,
}

impl FeeSplit {
    /// Truncate `fee` first, then take `admin_share` of that integer, so that
    /// `lp + admin == total` always holds.
    pub fn new(token: &Token, fee: &Fraction, admin_share: &Fraction) -> Result<Self> {
        let total = TokenAmount::from_fraction(token.clone(), fee)?;
        let admin = total.scale(admin_share)?;
        let lp = total.checked_sub(&admin)?;
        Ok(Self { total, lp, admin })
    }

    pub fn zero(token: &Token) -> Self {
        Self {
            total: TokenAmount::zero(token.clone()),
            lp: TokenAmount::zero(token.clone()),
            admin: TokenAmount::zero(token.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stableswap_types::Network;

    fn fees(trade: (i64, i64)) -> Fees {
        Fees::new(
            Fraction::new(trade.0, trade.1).unwrap(),
            Fraction::new(1, 3).unwrap(),
            Fraction::zero(),
            Fraction::zero(),
        )
        .unwrap()
    }

    #[test]
    fn test_normalized_fee_is_half_for_two_coins() {
        let fee = pool_trade_fee(&fees((4, 10_000)), &BigInt::from(1_000_000)).unwrap();
        assert_eq!(fee, Fraction::from(200u64));

        // Not truncated
        let fee = pool_trade_fee(&fees((4, 10_000)), &BigInt::from(1_001)).unwrap();
        assert_eq!(fee, Fraction::new(2_002, 10_000).unwrap());
    }

    #[test]
    fn test_normalized_fee_other_coin_counts() {
        // n = 3: 3 / 8 of the trade fee
        let fee = normalized_trade_fee(&fees((1, 10)), 3, &BigInt::from(800)).unwrap();
        assert_eq!(fee, Fraction::from(30u64));
    }

    #[test]
    fn test_normalized_fee_single_coin_is_degenerate() {
        let result = normalized_trade_fee(&fees((4, 10_000)), 1, &BigInt::from(1_000));
        assert!(matches!(
            result,
            Err(CalculatorError::ArithmeticDegenerate { .. })
        ));
    }

    #[test]
    fn test_split_truncates_total_before_admin_share() {
        let token = Token::new("LP", 6, Network::Localnet);
        let split = FeeSplit::new(
            &token,
            &Fraction::new(1999, 2).unwrap(),
            &Fraction::new(1, 3).unwrap(),
        )
        .unwrap();

        assert_eq!(split.total.raw(), 999);
        assert_eq!(split.admin.raw(), 333);
        assert_eq!(split.lp.raw(), 666);
        assert_eq!(split.lp.raw() + split.admin.raw(), split.total.raw());
    }
}
