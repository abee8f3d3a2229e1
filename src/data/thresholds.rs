//! Threshold table mapping metric names to their upper bounds.

use std::collections::BTreeMap;

use crate::config::MonitorConfig;
use crate::error::MonitorError;

/// Message counter reported alongside the latencies; never bounded.
pub const KAFKA_MESSAGES_RECEIVED: &str = "kafka_messages_received";
/// Exchange to dataservice hop latency.
pub const LATENCY_EXCHANGE_TO_DATASERVICE: &str = "latency_exchange_to_dataservice";
/// Dataservice to broker hop latency.
pub const LATENCY_DATASERVICE_TO_BROKER: &str = "latency_dataservice_to_broker";
/// Broker to bot hop latency.
pub const LATENCY_BROKER_TO_BOT: &str = "latency_broker_to_bot";

/// Upper bound for a single metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Values strictly greater than the limit are critical.
    Limit(f64),
    /// Any value is acceptable.
    Unlimited,
}

impl Bound {
    /// Convert a configured limit into a bound.
    ///
    /// `None` and positive infinity both mean "no limit". NaN, negative,
    /// and zero limits are rejected.
    pub fn from_limit(limit: Option<f64>) -> Result<Self, MonitorError> {
        match limit {
            None => Ok(Bound::Unlimited),
            Some(v) if v == f64::INFINITY => Ok(Bound::Unlimited),
            Some(v) if v.is_finite() && v > 0.0 => Ok(Bound::Limit(v)),
            Some(v) => Err(MonitorError::Config(format!(
                "threshold must be a positive number or inf, got {}",
                v
            ))),
        }
    }

    /// Check whether a value exceeds this bound.
    pub fn is_exceeded_by(&self, value: f64) -> bool {
        match self {
            Bound::Limit(limit) => value > *limit,
            Bound::Unlimited => false,
        }
    }
}

/// Immutable mapping from metric name to [`Bound`].
///
/// The key set is fixed at construction; there is no way to add entries
/// afterwards, so the table can be shared freely between tasks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThresholdTable {
    bounds: BTreeMap<String, Bound>,
}

impl ThresholdTable {
    /// Build a table from explicit `(name, bound)` pairs.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Bound)>,
        S: Into<String>,
    {
        Self {
            bounds: entries
                .into_iter()
                .map(|(name, bound)| (name.into(), bound))
                .collect(),
        }
    }

    /// Build the table for the four metrics the upstream component emits.
    pub fn from_config(config: &MonitorConfig) -> Result<Self, MonitorError> {
        let limit = |name: &str, value: Option<f64>| {
            Bound::from_limit(value).map_err(|e| MonitorError::Config(format!("{}: {}", name, e)))
        };

        Ok(Self::new([
            (KAFKA_MESSAGES_RECEIVED, Bound::Unlimited),
            (
                LATENCY_EXCHANGE_TO_DATASERVICE,
                limit(
                    "max_exchange_dataservice_latency_ms",
                    config.max_exchange_dataservice_latency_ms,
                )?,
            ),
            (
                LATENCY_DATASERVICE_TO_BROKER,
                limit(
                    "max_dataservice_broker_latency_ms",
                    config.max_dataservice_broker_latency_ms,
                )?,
            ),
            (
                LATENCY_BROKER_TO_BOT,
                limit("max_broker_bot_latency_ms", config.max_broker_bot_latency_ms)?,
            ),
        ]))
    }

    /// Look up the bound for a metric. `None` means the name is unknown.
    pub fn lookup(&self, name: &str) -> Option<Bound> {
        self.bounds.get(name).copied()
    }

    /// Number of configured metrics.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Check if no metrics are configured.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Configured metric names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bounds.keys().map(String::as_str)
    }
}
