//! Line filtering and `name: value` token extraction.

use std::sync::LazyLock;

use hopwatch_types::MetricSample;
use regex::Regex;

/// `<identifier>: <integer or decimal>` anywhere in a line.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+):\s+(\d+(?:\.\d+)?)").expect("valid regex"));

/// Extracts metric samples from lines that belong to one component.
#[derive(Debug, Clone)]
pub struct LineExtractor {
    component: String,
}

impl LineExtractor {
    /// Create an extractor for lines tagged with `component`.
    ///
    /// Matching is a case-sensitive substring test; an empty component
    /// accepts every line.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    /// The component tag this extractor filters on.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Check whether a line mentions the monitored component.
    pub fn matches_component(&self, line: &str) -> bool {
        line.contains(self.component.as_str())
    }

    /// Extract every `name: value` pair from a matching line, left to right.
    ///
    /// Lines that do not mention the component yield nothing.
    pub fn extract(&self, line: &str) -> Vec<MetricSample> {
        if !self.matches_component(line) {
            return Vec::new();
        }

        TOKEN_PATTERN
            .captures_iter(line)
            .filter_map(|caps| {
                let name = &caps[1];
                match caps[2].parse::<f64>() {
                    Ok(value) => Some(MetricSample::new(name, value, line)),
                    Err(e) => {
                        tracing::debug!(
                            name,
                            raw = &caps[2],
                            error = %e,
                            "Skipping unparsable value"
                        );
                        None
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(samples: &[MetricSample]) -> Vec<(&str, f64)> {
        samples.iter().map(|s| (s.name.as_str(), s.value)).collect()
    }

    #[test]
    fn test_extracts_in_order() {
        let extractor = LineExtractor::new("kafka");
        let samples = extractor.extract("kafka a: 1 b: 2");
        assert_eq!(pairs(&samples), vec![("a", 1.0), ("b", 2.0)]);

        // Same line, same answer
        assert_eq!(extractor.extract("kafka a: 1 b: 2"), samples);
    }

    #[test]
    fn test_keeps_source_line() {
        let extractor = LineExtractor::new("kafka");
        let line = "kafka latency_exchange_to_dataservice: 450 latency_dataservice_to_broker: 12";
        let samples = extractor.extract(line);
        assert_eq!(
            pairs(&samples),
            vec![
                ("latency_exchange_to_dataservice", 450.0),
                ("latency_dataservice_to_broker", 12.0)
            ]
        );
        assert!(samples.iter().all(|s| s.line == line));
    }

    #[test]
    fn test_other_component_yields_nothing() {
        let extractor = LineExtractor::new("kafka");
        assert!(!extractor.matches_component("other_system latency_exchange_to_dataservice: 999"));
        assert!(extractor
            .extract("other_system latency_exchange_to_dataservice: 999")
            .is_empty());
    }

    #[test]
    fn test_component_match_is_case_sensitive() {
        let extractor = LineExtractor::new("kafka");
        assert!(extractor.extract("KAFKA a: 1").is_empty());
        assert_eq!(extractor.extract("2024-01-01 [kafka-consumer] a: 1").len(), 1);
    }

    #[test]
    fn test_decimal_values() {
        let extractor = LineExtractor::new("kafka");
        let samples = extractor.extract("kafka latency_broker_to_bot: 12.75");
        assert_eq!(pairs(&samples), vec![("latency_broker_to_bot", 12.75)]);
    }

    #[test]
    fn test_line_without_tokens() {
        let extractor = LineExtractor::new("kafka");
        assert!(extractor.extract("kafka consumer rebalanced").is_empty());
        assert!(extractor.extract("kafka lag:high").is_empty());
    }

    #[test]
    fn test_requires_whitespace_after_colon() {
        let extractor = LineExtractor::new("kafka");
        assert!(extractor.extract("kafka at 12:30:45 nothing").is_empty());
    }

    #[test]
    fn test_empty_component_matches_everything() {
        let extractor = LineExtractor::new("");
        assert_eq!(extractor.extract("x: 3").len(), 1);
    }
}
