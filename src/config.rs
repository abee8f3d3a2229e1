//! Monitor configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `HOPWATCH_*` environment variables. The binary applies CLI overrides on top.
//!
//! ```toml
//! component = "kafka"
//! logfile = "/var/log/bot/bot.log"
//! poll_interval = "1s"
//! max_exchange_dataservice_latency_ms = 400
//! max_dataservice_broker_latency_ms = inf
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::report::OutputFormat;

/// Environment variable prefix for overrides (e.g. `HOPWATCH_LOGFILE`).
pub const ENV_PREFIX: &str = "HOPWATCH";

/// Configuration for a single monitored log file.
///
/// Latency bounds are exclusive upper limits in milliseconds. `None` or an
/// infinite value means the metric is never critical.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Tag a line must contain to be inspected.
    pub component: String,

    /// Limit for `latency_exchange_to_dataservice`.
    pub max_exchange_dataservice_latency_ms: Option<f64>,

    /// Limit for `latency_dataservice_to_broker`.
    pub max_dataservice_broker_latency_ms: Option<f64>,

    /// Limit for `latency_broker_to_bot`.
    pub max_broker_bot_latency_ms: Option<f64>,

    /// Log file to follow.
    pub logfile: PathBuf,

    /// How long to wait before re-checking the file when no new data is available.
    pub poll_interval: String,

    /// How status events are printed.
    pub format: OutputFormat,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            component: "kafka".to_string(),
            max_exchange_dataservice_latency_ms: Some(400.0),
            max_dataservice_broker_latency_ms: None,
            max_broker_bot_latency_ms: None,
            logfile: PathBuf::from("bot.log"),
            poll_interval: "1s".to_string(),
            format: OutputFormat::Text,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            tracing::info!(path = %path.display(), "Loading config file");
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize::<MonitorConfig>()
            .context("Failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Parsed poll interval.
    pub fn poll_interval(&self) -> Result<Duration> {
        parse_duration(&self.poll_interval)
    }

    /// Check values that deserialization alone cannot catch.
    pub fn validate(&self) -> Result<()> {
        let interval = self
            .poll_interval()
            .with_context(|| format!("Invalid poll_interval {:?}", self.poll_interval))?;
        if interval.is_zero() {
            bail!("poll_interval must be greater than zero");
        }
        if self.logfile.as_os_str().is_empty() {
            bail!("logfile must not be empty");
        }
        Ok(())
    }
}
