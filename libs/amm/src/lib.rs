//! # StableSwap AMM Library - Exact Two-Asset Curve Mathematics
//!
//! ## Purpose
//!
//! Client-side quoting for two-asset StableSwap pools. Reproduces the pool
//! program's integer arithmetic exactly so that minimum-output and
//! minimum-mint guards built from these quotes match what executes on chain.
//!
//! ## Integration Points
//!
//! - **Input Sources**: [`ExchangeInfo`](stableswap_types::ExchangeInfo) snapshots decoded by an account-loading layer
//! - **Output Destinations**: transaction builders (slippage guards), price displays
//! - **Precision**: arbitrary-precision integers, truncating division everywhere
//! - **Termination**: both Newton solvers are capped at [`MAX_ITERATIONS`] steps
//!
//! ## Design Principles
//!
//! - **Pure Functions**: no I/O, no shared state, safe to call from any thread
//! - **Scaled Solvers**: every solver call receives exchange-rate-scaled balances
//! - **Fee Ordering**: total fees are truncated before the admin share is taken
//! - **Fail Loudly**: degenerate pools and shrinking invariants are errors, never clamped
//!
//! ## Quick Start
//!
//! ```rust
//! use stableswap_amm::calculate_estimated_swap_output_amount;
//! use stableswap_types::{ExchangeInfo, Fees, Network, Reserve, Token, TokenAmount};
//!
//! let usdc = Token::new("usdc", 6, Network::Localnet);
//! let usdt = Token::new("usdt", 6, Network::Localnet);
//! let lp = Token::new("lp", 6, Network::Localnet);
//!
//! let exchange = ExchangeInfo {
//!     amp_factor: 100,
//!     fees: Fees::zero(),
//!     lp_total_supply: TokenAmount::new(lp, 2_000_000_000),
//!     reserves: [
//!         Reserve::new(TokenAmount::new(usdc.clone(), 1_000_000_000), "reserve-a", "admin-a"),
//!         Reserve::new(TokenAmount::new(usdt, 1_000_000_000), "reserve-b", "admin-b"),
//!     ],
//! };
//!
//! let quote = calculate_estimated_swap_output_amount(&exchange, &TokenAmount::new(usdc, 10_000))?;
//! assert_eq!(quote.output_amount.raw(), 10_000);
//! # Ok::<(), stableswap_amm::CalculatorError>(())
//! ```

pub mod amp;
pub mod curve;
pub mod deposit;
pub mod errors;
pub mod fees;
pub mod price;
pub mod scaling;
pub mod swap;
pub mod withdraw;

pub use amp::{compute_amp_factor, AmpRamp};
pub use curve::{compute_d, compute_y, solve_d, solve_y, Solution, MAX_ITERATIONS};
pub use deposit::{calculate_estimated_mint_amount, MintEstimate};
pub use errors::{CalculatorError, Result};
pub use fees::{normalized_trade_fee, pool_trade_fee, FeeSplit};
pub use price::{calculate_swap_price, calculate_virtual_price};
pub use swap::{calculate_estimated_swap_output_amount, SwapEstimate};
pub use withdraw::{
    calculate_estimated_withdraw_amount, calculate_estimated_withdraw_one_amount,
    WithdrawEstimate, WithdrawOneEstimate,
};

#[cfg(test)]
pub(crate) mod test_utils {
    use stableswap_types::{ExchangeInfo, Fees, Network, Reserve, Token, TokenAmount};

    pub fn token(mint: &str) -> Token {
        Token::new(mint, 6, Network::Localnet)
    }

    /// Pool of tokens "A"/"B" with 2_000_000_000 "LP" outstanding
    pub fn exchange(amp_factor: u64, reserve_a: u64, reserve_b: u64, fees: Fees) -> ExchangeInfo {
        ExchangeInfo {
            amp_factor,
            fees,
            lp_total_supply: TokenAmount::new(token("LP"), 2_000_000_000),
            reserves: [
                Reserve::new(TokenAmount::new(token("A"), reserve_a), "reserve-a", "admin-a"),
                Reserve::new(TokenAmount::new(token("B"), reserve_b), "reserve-b", "admin-b"),
            ],
        }
    }

    pub mod fees {
        use stableswap_types::{Fees, Fraction};

        fn ratio(numerator: u64, denominator: u64) -> Fraction {
            Fraction::new(numerator, denominator).unwrap()
        }

        pub fn zero() -> Fees {
            Fees::zero()
        }

        /// 4 bps trade, 50 bps withdraw, half of each to the admin
        pub fn standard() -> Fees {
            Fees::new(ratio(4, 10_000), ratio(1, 2), ratio(5, 1_000), ratio(1, 2)).unwrap()
        }

        /// Only a withdraw fee, all of it kept by LPs
        pub fn withdraw_only(numerator: u64, denominator: u64) -> Fees {
            Fees::new(
                Fraction::zero(),
                Fraction::zero(),
                ratio(numerator, denominator),
                Fraction::zero(),
            )
            .unwrap()
        }
    }
}
