//! StableSwap Quoter
//!
//! Loads a pool snapshot from configuration and prints calculator quotes as
//! JSON on stdout. Logs go to stderr so the output stays machine-readable.
//!
//! ```text
//! stableswap-quoter --config pool.toml swap --from <mint> --amount 1000000
//! ```

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use stableswap_config::{load_config, GlobalConfig};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "stableswap-quoter")]
#[command(about = "Quote swaps, deposits and withdrawals against a StableSwap pool snapshot")]
struct Args {
    /// Configuration file path, `~` and `${VAR}` are expanded
    #[arg(short, long, default_value = "config/quoter.toml")]
    config: String,

    /// Environment overlay (devnet, mainnet, ...)
    #[arg(short, long)]
    environment: Option<String>,

    /// Unix timestamp used to resolve an amplification ramp, defaults to now
    #[arg(long)]
    now: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(global: &GlobalConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&global.log_level))
        .context("Invalid log level")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if global.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn unix_now() -> Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the unix epoch")?;
    i64::try_from(elapsed.as_secs()).context("System clock out of range")
}

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    let config = load_config(&args.config, args.environment.as_deref())
        .context("Failed to load configuration")?;
    init_tracing(&config.global)?;

    info!(config = %args.config, environment = ?args.environment, "Quoter starting");

    let now = match args.now {
        Some(now) => now,
        None => unix_now()?,
    };
    let exchange = config
        .pool
        .to_exchange_info(now)
        .context("Invalid pool configuration")?;
    debug!(now, amp_factor = exchange.amp_factor, "Pool snapshot ready");

    let report = args.command.run(&exchange)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
