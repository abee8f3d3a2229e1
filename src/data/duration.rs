//! Poll interval parsing and formatting.

use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to nanoseconds multiplier (longer suffixes first so "ms" wins over "s")
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
];

/// Parse interval strings like "1s", "250ms", "1.5s" or "500us".
///
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            return to_duration(s, val_str, *multiplier);
        }
    }

    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return to_duration(s, s, 1_000_000_000.0);
    }

    bail!("Unknown duration format: {:?}", s)
}

fn to_duration(original: &str, val_str: &str, multiplier: f64) -> Result<Duration> {
    let val: f64 = val_str
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid duration {:?}: {}", original, e))?;
    if !val.is_finite() || val < 0.0 {
        bail!("Duration must be a non-negative number: {:?}", original);
    }
    Ok(Duration::from_nanos((val * multiplier) as u64))
}

/// Format a duration for log output
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        "0ns".to_string()
    } else if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_milliseconds() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn test_parse_microseconds() {
        assert_eq!(parse_duration("500us").unwrap(), Duration::from_micros(500));
        assert_eq!(parse_duration("16µs").unwrap(), Duration::from_micros(16));
    }

    #[test]
    fn test_bare_number_is_seconds() {
        assert_eq!(parse_duration("2").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration(" 0.5 ").unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-1s").is_err());
        assert!(parse_duration("fastms").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0ns");
        assert_eq!(format_duration(Duration::from_millis(250)), "250.00ms");
        assert_eq!(format_duration(Duration::from_secs(1)), "1.00s");
    }
}
