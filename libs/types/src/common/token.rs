//! Token identities and 64-bit token amounts
//!
//! A [`Token`] is identified by its mint and network only; decimals and the
//! optional symbol are carried for display. A [`TokenAmount`] is a raw `u64`
//! quantity tagged with its token, and every operation that could leave the
//! `u64` range or combine two different tokens fails instead of wrapping.

use crate::common::errors::AmountError;
use crate::common::fraction::Fraction;
use num::{BigInt, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Cluster a mint lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    #[default]
    MainnetBeta,
    Devnet,
    Testnet,
    Localnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::MainnetBeta => "mainnet-beta",
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

/// Fungible asset identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub mint: String,
    pub decimals: u8,
    #[serde(default)]
    pub network: Network,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Token {
    pub fn new(mint: impl Into<String>, decimals: u8, network: Network) -> Self {
        Self {
            mint: mint.into(),
            decimals,
            network,
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// `10^decimals`, the raw amount of one whole token
    pub fn one_unit(&self) -> BigInt {
        BigInt::from(10u8).pow(u32::from(self.decimals))
    }

    /// Fail with `TokenMismatch` unless `other` is the same token
    pub fn ensure_same(&self, other: &Token) -> Result<(), AmountError> {
        if self == other {
            Ok(())
        } else {
            Err(AmountError::mismatch(self, other))
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.mint == other.mint && self.network == other.network
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mint.hash(state);
        self.network.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{symbol} ({}@{})", self.mint, self.network),
            None => write!(f, "{}@{}", self.mint, self.network),
        }
    }
}

/// Raw `u64` quantity of a token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenAmount {
    pub token: Token,
    raw: u64,
}

impl TokenAmount {
    pub fn new(token: Token, raw: u64) -> Self {
        Self { token, raw }
    }

    pub fn zero(token: Token) -> Self {
        Self { token, raw: 0 }
    }

    /// Validate an arbitrary-precision raw value into the `u64` range
    pub fn from_big(token: Token, raw: &BigInt) -> Result<Self, AmountError> {
        let raw = raw.to_u64().ok_or_else(|| AmountError::overflow(raw))?;
        Ok(Self { token, raw })
    }

    /// Truncate a fraction toward zero, then validate the `u64` range
    pub fn from_fraction(token: Token, value: &Fraction) -> Result<Self, AmountError> {
        Self::from_big(token, &value.truncate())
    }

    pub fn raw(&self) -> u64 {
        self.raw
    }

    pub fn to_big(&self) -> BigInt {
        BigInt::from(self.raw)
    }

    pub fn as_fraction(&self) -> Fraction {
        Fraction::from(self.raw)
    }

    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    pub fn checked_add(&self, rhs: &TokenAmount) -> Result<Self, AmountError> {
        self.token.ensure_same(&rhs.token)?;
        let raw = self
            .raw
            .checked_add(rhs.raw)
            .ok_or_else(|| AmountError::overflow(u128::from(self.raw) + u128::from(rhs.raw)))?;
        Ok(Self::new(self.token.clone(), raw))
    }

    pub fn checked_sub(&self, rhs: &TokenAmount) -> Result<Self, AmountError> {
        self.token.ensure_same(&rhs.token)?;
        let raw = self
            .raw
            .checked_sub(rhs.raw)
            .ok_or_else(|| AmountError::overflow(i128::from(self.raw) - i128::from(rhs.raw)))?;
        Ok(Self::new(self.token.clone(), raw))
    }

    /// Multiply by `factor`, truncating toward zero
    pub fn scale(&self, factor: &Fraction) -> Result<Self, AmountError> {
        Self::from_fraction(self.token.clone(), &(&self.as_fraction() * factor))
    }

    /// Amount in whole tokens, e.g. `1.500000` for 1_500_000 of a 6-decimal mint
    pub fn to_exact(&self) -> String {
        let whole = Fraction::new(self.raw, self.token.one_unit())
            .unwrap_or_else(|_| Fraction::zero());
        whole.to_fixed(u32::from(self.token.decimals))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token.symbol {
            Some(symbol) => write!(f, "{} {symbol}", self.to_exact()),
            None => write!(f, "{} {}", self.to_exact(), self.token.mint),
        }
    }
}
