//! Pool snapshot configuration
//!
//! Describes one pool the way the account-loading layer would decode it and
//! turns it into an [`ExchangeInfo`] for the calculators.

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use stableswap_amm::{compute_amp_factor, AmpRamp};
use stableswap_types::{ExchangeInfo, Fees, Fraction, Reserve, Token, TokenAmount};
use tracing::debug;

/// Exact ratio written as `{ numerator = .., denominator = .. }`
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct RatioConfig {
    pub numerator: u64,
    pub denominator: u64,
}

impl RatioConfig {
    pub fn to_fraction(self, name: &str) -> Result<Fraction> {
        Fraction::new(self.numerator, self.denominator)
            .with_context(|| format!("Invalid ratio for {name}"))
    }
}

/// Fee schedule, every entry a ratio in `[0, 1)`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FeesConfig {
    pub trade: RatioConfig,
    pub admin_trade: RatioConfig,
    pub withdraw: RatioConfig,
    pub admin_withdraw: RatioConfig,
}

impl FeesConfig {
    pub fn to_fees(&self) -> Result<Fees> {
        Fees::new(
            self.trade.to_fraction("trade fee")?,
            self.admin_trade.to_fraction("admin trade fee")?,
            self.withdraw.to_fraction("withdraw fee")?,
            self.admin_withdraw.to_fraction("admin withdraw fee")?,
        )
        .context("Invalid fee schedule")
    }
}

/// One pool reserve
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReserveConfig {
    pub token: Token,
    /// Raw balance
    pub amount: u64,
    pub reserve_account: String,
    pub admin_fee_account: String,
    pub exchange_rate: Option<RatioConfig>,
}

impl ReserveConfig {
    pub fn to_reserve(&self) -> Result<Reserve> {
        let reserve = Reserve::new(
            TokenAmount::new(self.token.clone(), self.amount),
            self.reserve_account.clone(),
            self.admin_fee_account.clone(),
        );

        match self.exchange_rate {
            Some(rate) => {
                let rate = rate.to_fraction(&format!("{} exchange rate", self.token))?;
                ensure!(
                    !rate.is_zero(),
                    "Exchange rate of {} must be positive",
                    self.token
                );
                Ok(reserve.with_exchange_rate(rate))
            }
            None => Ok(reserve),
        }
    }
}

/// Pool snapshot
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PoolConfig {
    /// Fixed amplification coefficient; ignored when `amp_ramp` is set
    pub amp_factor: Option<u64>,
    pub amp_ramp: Option<AmpRamp>,
    pub fees: FeesConfig,
    pub lp_token: Token,
    /// Raw LP token supply
    pub lp_total_supply: u64,
    pub reserves: Vec<ReserveConfig>,
}

impl PoolConfig {
    /// Effective amplification coefficient at unix time `now`
    pub fn amp_factor_at(&self, now: i64) -> Result<u64> {
        let amp_factor = match (&self.amp_ramp, self.amp_factor) {
            (Some(ramp), _) => compute_amp_factor(ramp, now).context("Invalid amp ramp")?,
            (None, Some(amp_factor)) => amp_factor,
            (None, None) => bail!("Pool needs either amp_factor or amp_ramp"),
        };
        ensure!(amp_factor > 0, "Amplification coefficient must be positive");
        Ok(amp_factor)
    }

    /// Validate and build the snapshot the calculators consume
    pub fn to_exchange_info(&self, now: i64) -> Result<ExchangeInfo> {
        let [reserve_a, reserve_b] = self.reserves.as_slice() else {
            bail!(
                "Pool needs exactly two reserves, found {}",
                self.reserves.len()
            );
        };
        ensure!(
            reserve_a.token != reserve_b.token,
            "Both reserves hold {}",
            reserve_a.token
        );
        ensure!(
            self.lp_token != reserve_a.token && self.lp_token != reserve_b.token,
            "LP token {} is also a reserve token",
            self.lp_token
        );

        let exchange = ExchangeInfo {
            amp_factor: self.amp_factor_at(now)?,
            fees: self.fees.to_fees()?,
            lp_total_supply: TokenAmount::new(self.lp_token.clone(), self.lp_total_supply),
            reserves: [reserve_a.to_reserve()?, reserve_b.to_reserve()?],
        };

        debug!(
            amp_factor = exchange.amp_factor,
            lp_total_supply = self.lp_total_supply,
            "Exchange snapshot built"
        );
        Ok(exchange)
    }
}
