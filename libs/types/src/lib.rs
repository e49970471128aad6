//! # StableSwap Types Library
//!
//! Value types for two-asset StableSwap pool calculations.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: ratios and intermediate amounts are exact rationals
//! - **Explicit Truncation**: values become integers only at [`TokenAmount`] boundaries
//! - **Type Safety**: amounts and prices carry their token, mixing tokens is an error
//! - **Bounded Amounts**: raw amounts always fit in `u64`, like on-chain balances
//! - **Immutable Snapshots**: [`ExchangeInfo`] is rebuilt per read, never mutated
//!
//! ## Quick Start
//!
//! ```rust
//! use stableswap_types::{Fraction, Network, Token, TokenAmount};
//!
//! let usdc = Token::new("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 6, Network::MainnetBeta);
//! let amount = TokenAmount::new(usdc, 2_500_000);
//!
//! // Exact ratio, truncated only when turned back into an amount
//! let fee = amount.scale(&Fraction::new(4, 10_000).unwrap()).unwrap();
//! assert_eq!(fee.raw(), 1_000);
//! ```

pub mod common;

pub use common::errors::AmountError;
pub use common::exchange::{ExchangeInfo, Fees, Reserve, Side, N_COINS};
pub use common::fraction::Fraction;
pub use common::price::Price;
pub use common::token::{Network, Token, TokenAmount};

/// Arbitrary-precision integer used by the solvers
pub use num::BigInt;
