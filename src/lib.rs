//! # hopwatch
//!
//! Tails a growing log file, pulls `name: value` metrics out of the lines a
//! given component writes, checks each metric against its configured limit
//! and emits a status event per sample.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────── Pipeline ────────────────────────────┐
//! │  ┌──────────┐    ┌───────────────┐    ┌──────────┐               │
//! │  │ Follower │───▶│ LineExtractor │───▶│ evaluate │──┐            │
//! │  │ (source) │    │    (data)     │    │  (data)  │  │            │
//! │  └──────────┘    └───────────────┘    └──────────┘  │            │
//! └─────────────────────────────────────────────────────┼────────────┘
//!                                                       ▼
//!                                         unbounded FIFO channel
//!                                                       │
//!                                                       ▼
//!                                     run_consumer ──▶ Reporter (report)
//! ```
//!
//! - **[`source`]**: [`LineSource`] trait and the tail-style [`Follower`]
//! - **[`data`]**: [`ThresholdTable`], [`LineExtractor`] and [`evaluate`]
//! - **[`pipeline`]**: the driver task and the delivery channel
//! - **[`report`]**: the [`Reporter`] trait and the default [`PrintReporter`]
//! - **[`config`]**: layered configuration ([`MonitorConfig`])
//!
//! ## Usage
//!
//! ```no_run
//! use hopwatch::{channel, run_consumer, MonitorConfig, OutputFormat, Pipeline, PrintReporter};
//! use tokio_util::sync::CancellationToken;
//!
//! # tokio_test::block_on(async {
//! let config = MonitorConfig::default();
//! let pipeline = Pipeline::open(&config)?;
//!
//! let (tx, rx) = channel();
//! let cancel = CancellationToken::new();
//! tokio::spawn(pipeline.run(tx, cancel.clone()));
//!
//! let mut reporter = PrintReporter::stdout(OutputFormat::Text);
//! run_consumer(rx, &mut reporter, cancel).await;
//! # Ok::<(), hopwatch::MonitorError>(())
//! # }).unwrap();
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod source;

pub use config::MonitorConfig;
pub use data::{evaluate, evaluate_sample, Bound, LineExtractor, ThresholdTable};
pub use error::{FollowError, MonitorError};
pub use pipeline::{channel, Pipeline, PipelineStats, StatusReceiver, StatusSender};
pub use report::{run_consumer, ConsumerStats, OutputFormat, PrintReporter, Reporter};
pub use source::{FollowState, Follower, LineSource};

// Re-export types for convenience
pub use hopwatch_types::{MetricSample, Status, StatusEvent};
