//! Exact rational arithmetic for fee ratios and scaled pool quantities
//!
//! [`Fraction`] wraps an arbitrary-precision rational so that fee ratios,
//! exchange rates and intermediate amounts never lose precision. Values are
//! only rounded when explicitly requested through [`Fraction::truncate`],
//! which rounds toward zero exactly like the on-chain program's integer
//! division.
//!
//! ## Design Principles
//!
//! - **No Precision Loss**: add/sub/mul/div are exact
//! - **Explicit Truncation**: rounding happens at named conversion points only
//! - **No Floating Point**: display formatting is done on integers as well

use crate::common::errors::AmountError;
use num::{BigInt, BigRational, One, Signed, Zero};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Arbitrary-precision rational number with a strictly positive denominator
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fraction(BigRational);

impl Fraction {
    /// Create `numerator / denominator`
    ///
    /// # Examples
    /// ```
    /// use stableswap_types::Fraction;
    ///
    /// let fee = Fraction::new(4, 10_000).unwrap();
    /// assert_eq!(fee.to_fixed(4), "0.0004");
    /// ```
    pub fn new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, AmountError> {
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(AmountError::DivisionByZero);
        }
        Ok(Self(BigRational::new(numerator.into(), denominator)))
    }

    /// Whole number `value / 1`
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self(BigRational::from_integer(value.into()))
    }

    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    pub fn one() -> Self {
        Self(BigRational::one())
    }

    /// Reduced numerator
    pub fn numerator(&self) -> &BigInt {
        self.0.numer()
    }

    /// Reduced, always positive denominator
    pub fn denominator(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Exact division, failing on a zero divisor
    pub fn checked_div(&self, rhs: &Fraction) -> Result<Self, AmountError> {
        if rhs.is_zero() {
            return Err(AmountError::DivisionByZero);
        }
        Ok(Self(&self.0 / &rhs.0))
    }

    /// Reciprocal, failing on zero
    pub fn invert(&self) -> Result<Self, AmountError> {
        Self::one().checked_div(self)
    }

    /// Round toward zero to a whole number
    ///
    /// For the non-negative quantities handled by the calculators this is a
    /// floor, matching integer division on chain.
    pub fn truncate(&self) -> BigInt {
        self.0.to_integer()
    }

    /// Decimal rendering with `places` fractional digits, truncated toward zero
    pub fn to_fixed(&self, places: u32) -> String {
        let scale = BigInt::from(10u8).pow(places);
        let scaled = (&self.0 * BigRational::from_integer(scale.clone())).to_integer();
        let sign = if scaled.is_negative() { "-" } else { "" };
        let magnitude = scaled.abs();

        if places == 0 {
            return format!("{sign}{magnitude}");
        }

        let whole = &magnitude / &scale;
        let fractional = &magnitude % &scale;
        format!(
            "{sign}{whole}.{fractional:0>width$}",
            width = places as usize
        )
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_integer() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

/// Parses `"n"` or `"n/d"`
impl FromStr for Fraction {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountError::InvalidFormat {
            input: s.to_string(),
        };
        match s.trim().split_once('/') {
            Some((numerator, denominator)) => {
                let numerator = BigInt::from_str(numerator.trim()).map_err(|_| invalid())?;
                let denominator = BigInt::from_str(denominator.trim()).map_err(|_| invalid())?;
                Self::new(numerator, denominator)
            }
            None => BigInt::from_str(s.trim())
                .map(Self::from_integer)
                .map_err(|_| invalid()),
        }
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

impl From<u64> for Fraction {
    fn from(value: u64) -> Self {
        Self::from_integer(value)
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Self::Output {
        Fraction(-self.0)
    }
}

/// Exact, infallible operators. Division goes through [`Fraction::checked_div`].
macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<&Fraction> for &Fraction {
            type Output = Fraction;

            fn $method(self, rhs: &Fraction) -> Fraction {
                Fraction((&self.0).$method(&rhs.0))
            }
        }

        impl $trait<Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: Fraction) -> Fraction {
                Fraction(self.0.$method(rhs.0))
            }
        }

        impl $trait<&Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: &Fraction) -> Fraction {
                Fraction(self.0.$method(&rhs.0))
            }
        }

        impl $trait<&BigInt> for &Fraction {
            type Output = Fraction;

            fn $method(self, rhs: &BigInt) -> Fraction {
                Fraction((&self.0).$method(BigRational::from_integer(rhs.clone())))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
