//! # hopwatch-types
//!
//! Core value types shared by the hopwatch pipeline and anything consuming
//! its output. A [`MetricSample`] is one `name: value` pair pulled out of a
//! log line; a [`StatusEvent`] is the verdict produced for that sample.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for all types, so status events can be
//!   forwarded as JSON to downstream sinks
//!
//! ## Example
//!
//! ```rust
//! use hopwatch_types::{Status, StatusEvent};
//!
//! let event = StatusEvent::crit(
//!     "latency_exchange_to_dataservice",
//!     450.0,
//!     "latency at 450 exceeded max limit 400",
//! );
//!
//! assert_eq!(event.status, Status::Crit);
//! assert_eq!(
//!     event.to_string(),
//!     "CRIT latency_exchange_to_dataservice=450 (latency at 450 exceeded max limit 400)"
//! );
//! ```

mod sample;
mod status;

pub use sample::*;
pub use status::*;
