//! Metric extraction and health evaluation.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of interval strings (e.g., "1s", "500ms")
//! - [`extract`]: Component filter and `name: value` token extraction ([`LineExtractor`])
//! - [`thresholds`]: Metric name to upper bound mapping ([`ThresholdTable`])
//! - [`evaluate`]: Turns a sample into a [`StatusEvent`](hopwatch_types::StatusEvent)
//!
//! ## Data Flow
//!
//! ```text
//! log line
//!    │
//!    ▼
//! LineExtractor::extract()  ──▶ MetricSample*
//!                                   │
//!                                   ▼
//!                      evaluate_sample(&ThresholdTable)
//!                                   │
//!                                   ▼
//!                              StatusEvent
//! ```

pub mod duration;
pub mod evaluate;
pub mod extract;
pub mod thresholds;

pub use evaluate::{evaluate, evaluate_sample};
pub use extract::LineExtractor;
pub use thresholds::{Bound, ThresholdTable};
