//! Status verdicts for evaluated metrics.

use std::fmt;

/// Health verdict for a single metric sample.
///
/// Variants are ordered by severity so `max()` over a set of events yields
/// the worst one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Status {
    /// Value is within its bound, or the metric has no bound.
    Ok,
    /// The metric name has no entry in the threshold table.
    Unknown,
    /// Value exceeded its configured bound.
    Crit,
}

impl Status {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Unknown => "UNKNOWN",
            Status::Crit => "CRIT",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The evaluated health of one metric sample.
///
/// Events are immutable once built and are moved through the delivery
/// channel by value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEvent {
    /// Metric name the verdict applies to.
    pub service_name: String,

    /// The verdict.
    pub status: Status,

    /// The sampled value.
    pub metric_value: f64,

    /// Human-readable explanation; empty for `Ok`.
    pub detail: String,
}

impl StatusEvent {
    /// Create an event with an arbitrary status.
    pub fn new(
        service_name: impl Into<String>,
        status: Status,
        metric_value: f64,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            status,
            metric_value,
            detail: detail.into(),
        }
    }

    /// Create an `Ok` event with an empty detail.
    pub fn ok(service_name: impl Into<String>, metric_value: f64) -> Self {
        Self::new(service_name, Status::Ok, metric_value, String::new())
    }

    /// Create a `Crit` event.
    pub fn crit(
        service_name: impl Into<String>,
        metric_value: f64,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(service_name, Status::Crit, metric_value, detail)
    }

    /// Create an `Unknown` event.
    pub fn unknown(
        service_name: impl Into<String>,
        metric_value: f64,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(service_name, Status::Unknown, metric_value, detail)
    }

    /// Check if the verdict is `Ok`.
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}={}", self.status, self.service_name, self.metric_value)?;
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}
