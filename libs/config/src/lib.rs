//! # StableSwap Quoter Configuration
//!
//! Configuration loading for the quoter: logging settings and the pool
//! snapshot to quote against.
//!
//! ## Features
//!
//! - **Layered Sources**: base TOML file, optional `environments/<name>.toml` overlay, `STABLESWAP_` variables
//! - **Exact Ratios**: fees and exchange rates are `{ numerator, denominator }` pairs, never floats
//! - **Validated Snapshots**: [`PoolConfig::to_exchange_info`] rejects malformed pools before any math runs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stableswap_config::load_config;
//!
//! let config = load_config("${HOME}/.config/stableswap/quoter.toml", Some("devnet"))?;
//! let exchange = config.pool.to_exchange_info(1_700_000_000)?;
//! println!("amp factor {}", exchange.amp_factor);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod pool;
pub mod quoter_config;

// Re-export commonly used types
pub use pool::{FeesConfig, PoolConfig, RatioConfig, ReserveConfig};
pub use quoter_config::{expand_path, load_config, GlobalConfig, QuoterConfig, ENV_PREFIX};
