//! Exchange rate between two tokens
//!
//! A [`Price`] stores the raw ratio "quote raw units per base raw unit".
//! Combining prices or quoting amounts checks that the tokens chain, so a
//! price can never be applied to an amount of an unrelated token.

use crate::common::errors::AmountError;
use crate::common::fraction::Fraction;
use crate::common::token::{Token, TokenAmount};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Price {
    pub base: Token,
    pub quote: Token,
    raw: Fraction,
}

impl Price {
    /// Price of one raw `base` unit expressed as `numerator / denominator` raw `quote` units
    ///
    /// Arguments come denominator first: `denominator` raw base units trade
    /// for `numerator` raw quote units.
    ///
    /// ```
    /// use stableswap_types::{Fraction, Network, Price, Token};
    ///
    /// let usdc = Token::new("usdc", 6, Network::Localnet);
    /// let usdt = Token::new("usdt", 6, Network::Localnet);
    /// // 4 raw USDC buy 5 raw USDT
    /// let price = Price::new(usdc, usdt, 4, 5)?;
    /// assert_eq!(price.raw(), &Fraction::new(5, 4)?);
    /// # Ok::<(), stableswap_types::AmountError>(())
    /// ```
    pub fn new(
        base: Token,
        quote: Token,
        denominator: impl Into<num::BigInt>,
        numerator: impl Into<num::BigInt>,
    ) -> Result<Self, AmountError> {
        let raw = Fraction::new(numerator, denominator)?;
        Ok(Self { base, quote, raw })
    }

    pub fn from_fraction(base: Token, quote: Token, raw: Fraction) -> Self {
        Self { base, quote, raw }
    }

    pub fn raw(&self) -> &Fraction {
        &self.raw
    }

    /// Swap base and quote
    pub fn invert(&self) -> Result<Self, AmountError> {
        Ok(Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
            raw: self.raw.invert()?,
        })
    }

    /// Chain `base -> quote` with `quote -> other.quote`
    pub fn multiply(&self, other: &Price) -> Result<Self, AmountError> {
        self.quote.ensure_same(&other.base)?;
        Ok(Self {
            base: self.base.clone(),
            quote: other.quote.clone(),
            raw: &self.raw * &other.raw,
        })
    }

    /// Convert an amount of the base token into the quote token, truncating
    pub fn quote(&self, amount: &TokenAmount) -> Result<TokenAmount, AmountError> {
        self.base.ensure_same(&amount.token)?;
        TokenAmount::from_fraction(self.quote.clone(), &(&amount.as_fraction() * &self.raw))
    }

    /// Price in whole tokens: raw ratio scaled by `10^base.decimals / 10^quote.decimals`
    pub fn adjusted(&self) -> Fraction {
        let scalar = Fraction::new(self.base.one_unit(), self.quote.one_unit())
            .unwrap_or_else(|_| Fraction::one());
        &self.raw * &scalar
    }

    pub fn to_fixed(&self, places: u32) -> String {
        self.adjusted().to_fixed(places)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} per {}",
            self.to_fixed(u32::from(self.quote.decimals)),
            self.quote.symbol.as_deref().unwrap_or(&self.quote.mint),
            self.base.symbol.as_deref().unwrap_or(&self.base.mint),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::token::Network;

    fn token(mint: &str, decimals: u8) -> Token {
        Token::new(mint, decimals, Network::Devnet)
    }

    #[test]
    fn test_new_takes_denominator_first() {
        let price = Price::new(token("A", 6), token("B", 6), 2, 3).unwrap();
        assert_eq!(price.raw(), &Fraction::new(3, 2).unwrap());
    }

    #[test]
    fn test_invert_swaps_orientation() {
        let price = Price::new(token("A", 6), token("B", 6), 4, 5).unwrap();
        let inverted = price.invert().unwrap();
        assert_eq!(inverted.base, token("B", 6));
        assert_eq!(inverted.quote, token("A", 6));
        assert_eq!(inverted.raw(), &Fraction::new(4, 5).unwrap());
    }

    #[test]
    fn test_multiply_requires_chain() {
        let ab = Price::new(token("A", 6), token("B", 6), 1, 2).unwrap();
        let bc = Price::new(token("B", 6), token("C", 6), 1, 3).unwrap();
        let ac = ab.multiply(&bc).unwrap();
        assert_eq!(ac.raw(), &Fraction::from(6u64));
        assert_eq!(ac.quote, token("C", 6));

        assert!(matches!(
            ab.multiply(&ab),
            Err(AmountError::TokenMismatch { .. })
        ));
    }

    #[test]
    fn test_quote_amount() {
        let price = Price::new(token("A", 6), token("B", 6), 10, 9).unwrap();
        let out = price.quote(&TokenAmount::new(token("A", 6), 1_000)).unwrap();
        assert_eq!(out.raw(), 900);
        assert_eq!(out.token, token("B", 6));

        assert!(price
            .quote(&TokenAmount::new(token("B", 6), 1_000))
            .is_err());
    }

    #[test]
    fn test_adjusted_for_decimals() {
        // 1 raw base unit (9 decimals) buys 1 raw quote unit (6 decimals)
        let price = Price::new(token("A", 9), token("B", 6), 1, 1).unwrap();
        assert_eq!(price.to_fixed(2), "1000.00");
    }
}
