//! Status evaluation: metric sample + threshold table -> status event.

use hopwatch_types::{MetricSample, StatusEvent};

use super::thresholds::{Bound, ThresholdTable};

/// Evaluate a single metric value against the threshold table.
///
/// Total: every input yields an event. Names missing from the table become
/// `Unknown` rather than an error.
pub fn evaluate(table: &ThresholdTable, name: &str, value: f64) -> StatusEvent {
    match table.lookup(name) {
        None => StatusEvent::unknown(
            name,
            value,
            format!("no threshold configured for {}", name),
        ),
        Some(bound @ Bound::Limit(limit)) if bound.is_exceeded_by(value) => StatusEvent::crit(
            name,
            value,
            format!("latency at {} exceeded max limit {}", value, limit),
        ),
        Some(_) => StatusEvent::ok(name, value),
    }
}

/// Evaluate an extracted sample.
pub fn evaluate_sample(table: &ThresholdTable, sample: &MetricSample) -> StatusEvent {
    evaluate(table, &sample.name, sample.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::thresholds::{KAFKA_MESSAGES_RECEIVED, LATENCY_EXCHANGE_TO_DATASERVICE};
    use hopwatch_types::Status;

    fn table() -> ThresholdTable {
        ThresholdTable::new([
            (KAFKA_MESSAGES_RECEIVED, Bound::Unlimited),
            (LATENCY_EXCHANGE_TO_DATASERVICE, Bound::Limit(400.0)),
        ])
    }

    #[test]
    fn test_at_or_below_limit_is_ok() {
        let table = table();
        for value in [0.0, 1.0, 399.9, 400.0] {
            let event = evaluate(&table, LATENCY_EXCHANGE_TO_DATASERVICE, value);
            assert_eq!(event.status, Status::Ok, "value {}", value);
            assert!(event.detail.is_empty());
            assert_eq!(event.metric_value, value);
        }
    }

    #[test]
    fn test_above_limit_is_crit() {
        let table = table();
        for value in [400.5, 450.0, 1e9] {
            let event = evaluate(&table, LATENCY_EXCHANGE_TO_DATASERVICE, value);
            assert_eq!(event.status, Status::Crit);
            assert!(event.detail.contains(&value.to_string()));
            assert!(event.detail.contains("400"));
        }
    }

    #[test]
    fn test_crit_detail_wording() {
        let event = evaluate(&table(), LATENCY_EXCHANGE_TO_DATASERVICE, 450.0);
        assert_eq!(event.detail, "latency at 450 exceeded max limit 400");
        assert_eq!(event.service_name, LATENCY_EXCHANGE_TO_DATASERVICE);
    }

    #[test]
    fn test_unlimited_is_always_ok() {
        let table = table();
        for value in [0.0, 10_000.0, f64::MAX] {
            let event = evaluate(&table, KAFKA_MESSAGES_RECEIVED, value);
            assert!(event.is_ok());
        }
    }

    #[test]
    fn test_unknown_metric() {
        let event = evaluate(&table(), "unknown_metric", 5.0);
        assert_eq!(event.status, Status::Unknown);
        assert_eq!(event.detail, "no threshold configured for unknown_metric");
        assert_eq!(event.metric_value, 5.0);
    }

    #[test]
    fn test_empty_table_yields_unknown() {
        let event = evaluate(&ThresholdTable::default(), LATENCY_EXCHANGE_TO_DATASERVICE, 1.0);
        assert_eq!(event.status, Status::Unknown);
    }

    #[test]
    fn test_evaluate_sample() {
        let sample = MetricSample::new(
            LATENCY_EXCHANGE_TO_DATASERVICE,
            401.0,
            "kafka latency_exchange_to_dataservice: 401",
        );
        assert_eq!(evaluate_sample(&table(), &sample).status, Status::Crit);
    }
}
