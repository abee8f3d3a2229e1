//! Metric samples extracted from log lines.

/// One `name: value` pair extracted from a log line.
///
/// Samples are short-lived: the pipeline evaluates each one immediately and
/// only the resulting [`StatusEvent`](crate::StatusEvent) travels further.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricSample {
    /// Metric name as it appeared in the line.
    pub name: String,

    /// Parsed numeric value.
    pub value: f64,

    /// The line the sample came from, kept for diagnostics.
    pub line: String,
}

impl MetricSample {
    /// Create a new sample.
    pub fn new(name: impl Into<String>, value: f64, line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            line: line.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_new() {
        let sample = MetricSample::new(
            "latency_broker_to_bot",
            12.5,
            "kafka latency_broker_to_bot: 12.5",
        );
        assert_eq!(sample.name, "latency_broker_to_bot");
        assert_eq!(sample.value, 12.5);
        assert!(sample.line.starts_with("kafka"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_sample_serializes_all_fields() {
        let sample = MetricSample::new("a", 1.0, "kafka a: 1");
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["name"], "a");
        assert_eq!(json["value"], 1.0);
        assert_eq!(json["line"], "kafka a: 1");
    }
}
