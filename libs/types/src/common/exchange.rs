//! Decoded pool state handed to the calculators
//!
//! The account-loading layer rebuilds an [`ExchangeInfo`] on every read of
//! chain state. Everything here is an immutable value; the calculators never
//! cache or mutate it.

use crate::common::errors::AmountError;
use crate::common::fraction::Fraction;
use crate::common::token::{Token, TokenAmount};
use serde::Serialize;

/// Number of assets in a pool. Every curve formula assumes exactly two.
pub const N_COINS: u8 = 2;

/// Which of the two reserves an operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// Fee schedule. `admin_trade` and `admin_withdraw` are shares of the
/// already computed fee, not of the traded amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fees {
    pub trade: Fraction,
    pub admin_trade: Fraction,
    pub withdraw: Fraction,
    pub admin_withdraw: Fraction,
}

impl Fees {
    /// Validate that every ratio lies in `[0, 1)`
    pub fn new(
        trade: Fraction,
        admin_trade: Fraction,
        withdraw: Fraction,
        admin_withdraw: Fraction,
    ) -> Result<Self, AmountError> {
        for (name, value) in [
            ("trade", &trade),
            ("admin_trade", &admin_trade),
            ("withdraw", &withdraw),
            ("admin_withdraw", &admin_withdraw),
        ] {
            if value.is_negative() || *value >= Fraction::one() {
                return Err(AmountError::InvalidFee {
                    name,
                    value: value.to_string(),
                });
            }
        }

        Ok(Self {
            trade,
            admin_trade,
            withdraw,
            admin_withdraw,
        })
    }

    pub fn zero() -> Self {
        Self {
            trade: Fraction::zero(),
            admin_trade: Fraction::zero(),
            withdraw: Fraction::zero(),
            admin_withdraw: Fraction::zero(),
        }
    }
}

/// One side of the pool: balance, the accounts holding it and an optional
/// exchange rate for assets not valued 1:1 at face value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reserve {
    pub amount: TokenAmount,
    pub reserve_account: String,
    pub admin_fee_account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Fraction>,
}

impl Reserve {
    pub fn new(
        amount: TokenAmount,
        reserve_account: impl Into<String>,
        admin_fee_account: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            reserve_account: reserve_account.into(),
            admin_fee_account: admin_fee_account.into(),
            exchange_rate: None,
        }
    }

    pub fn with_exchange_rate(mut self, rate: Fraction) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    /// Configured exchange rate, defaulting to 1
    pub fn rate(&self) -> Fraction {
        self.exchange_rate.clone().unwrap_or_else(Fraction::one)
    }

    pub fn token(&self) -> &Token {
        &self.amount.token
    }
}

/// Full pool snapshot consumed by the calculators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeInfo {
    pub amp_factor: u64,
    pub fees: Fees,
    pub lp_total_supply: TokenAmount,
    pub reserves: [Reserve; 2],
}

impl ExchangeInfo {
    pub fn reserve(&self, side: Side) -> &Reserve {
        &self.reserves[side.index()]
    }

    /// Resolve which reserve holds `token`, failing with `TokenMismatch`
    pub fn side_of(&self, token: &Token) -> Result<Side, AmountError> {
        if self.reserves[0].token() == token {
            Ok(Side::A)
        } else if self.reserves[1].token() == token {
            Ok(Side::B)
        } else {
            Err(AmountError::TokenMismatch {
                expected: format!(
                    "{} or {}",
                    self.reserves[0].token(),
                    self.reserves[1].token()
                ),
                found: token.to_string(),
            })
        }
    }

    pub fn lp_token(&self) -> &Token {
        &self.lp_total_supply.token
    }
}
