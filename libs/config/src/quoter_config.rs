//! Quoter Configuration Module
//!
//! Loads the quoter configuration from a TOML file with an optional
//! environment overlay and `STABLESWAP_`-prefixed environment variables.

use crate::pool::PoolConfig;
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Prefix of environment variable overrides, e.g. `STABLESWAP_GLOBAL__LOG_LEVEL`
pub const ENV_PREFIX: &str = "STABLESWAP";

/// Main quoter configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuoterConfig {
    /// Global settings
    #[serde(default)]
    pub global: GlobalConfig,

    /// Pool snapshot to quote against
    pub pool: PoolConfig,
}

/// Global configuration settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GlobalConfig {
    /// `EnvFilter` directive, e.g. `info` or `stableswap_amm=trace`
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl QuoterConfig {
    /// Load configuration from files with environment overrides
    ///
    /// The overlay for `environment` is read from
    /// `<dir of base_path>/environments/<environment>.toml` when present.
    pub fn load(base_path: &Path, environment: Option<&str>) -> Result<Self> {
        Self::load_with_prefix(base_path, environment, ENV_PREFIX)
    }

    pub(crate) fn load_with_prefix(
        base_path: &Path,
        environment: Option<&str>,
        env_prefix: &str,
    ) -> Result<Self> {
        let mut builder = Config::builder().add_source(File::from(base_path).required(true));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_file = base_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("environments")
                .join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables
        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        debug!(
            log_level = %config.global.log_level,
            reserves = config.pool.reserves.len(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Expand `~` and `${VAR}` in a configuration path
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path).context("Failed to expand config path")?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Convenience function to load configuration from an unexpanded path
pub fn load_config(path: &str, environment: Option<&str>) -> Result<QuoterConfig> {
    let path = expand_path(path)?;
    QuoterConfig::load(&path, environment)
        .with_context(|| format!("Failed to load {}", path.display()))
}
