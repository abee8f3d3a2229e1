//! Pipeline driver: follower → extractor → evaluator → delivery channel.

use std::time::Duration;

use hopwatch_types::{Status, StatusEvent};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::config::MonitorConfig;
use crate::data::duration::format_duration;
use crate::data::{evaluate_sample, LineExtractor, ThresholdTable};
use crate::error::MonitorError;
use crate::source::{Follower, LineSource};

/// Producing half of the delivery channel.
///
/// Cloneable, so several pipelines can feed one consumer.
pub type StatusSender = mpsc::UnboundedSender<StatusEvent>;

/// Consuming half of the delivery channel.
pub type StatusReceiver = mpsc::UnboundedReceiver<StatusEvent>;

/// Create an unbounded FIFO delivery channel.
///
/// Sending never blocks; a stalled consumer lets the queue grow without limit.
pub fn channel() -> (StatusSender, StatusReceiver) {
    mpsc::unbounded_channel()
}

/// Counters returned when a pipeline stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Complete lines received from the source.
    pub lines_read: u64,
    /// Lines that mentioned the monitored component.
    pub lines_matched: u64,
    /// Status events pushed onto the channel.
    pub events_sent: u64,
}

/// Why the follow loop returned normally.
enum Stop {
    Cancelled,
    ReceiversGone,
}

/// One monitored source with its filter and thresholds.
#[derive(Debug)]
pub struct Pipeline {
    source: Box<dyn LineSource>,
    thresholds: ThresholdTable,
    extractor: LineExtractor,
    poll_interval: Duration,
}

impl Pipeline {
    /// Open the configured log file and build the pipeline.
    ///
    /// Fails if the configuration is invalid or the file cannot be opened.
    pub fn open(config: &MonitorConfig) -> Result<Self, MonitorError> {
        let thresholds = ThresholdTable::from_config(config)?;
        let poll_interval = config
            .poll_interval()
            .map_err(|e| MonitorError::Config(format!("poll_interval: {}", e)))?;
        if poll_interval.is_zero() {
            return Err(MonitorError::Config(
                "poll_interval must be greater than zero".to_string(),
            ));
        }

        let source = Follower::open(&config.logfile)?;
        Ok(Self::with_source(
            Box::new(source),
            thresholds,
            LineExtractor::new(config.component.clone()),
            poll_interval,
        ))
    }

    /// Build a pipeline over an already opened source.
    pub fn with_source(
        source: Box<dyn LineSource>,
        thresholds: ThresholdTable,
        extractor: LineExtractor,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            thresholds,
            extractor,
            poll_interval,
        }
    }

    /// Description of the underlying source.
    pub fn description(&self) -> &str {
        self.source.description()
    }

    /// Run until cancelled, until every receiver is dropped, or until the
    /// source fails. The source is closed on every exit path.
    pub async fn run(
        mut self,
        tx: StatusSender,
        cancel: CancellationToken,
    ) -> Result<PipelineStats, MonitorError> {
        info!(
            source = %self.source.description(),
            component = %self.extractor.component(),
            metrics = self.thresholds.len(),
            poll_interval = %format_duration(self.poll_interval),
            "Pipeline started"
        );

        let mut stats = PipelineStats::default();
        let result = self.follow(&tx, &cancel, &mut stats).await;
        self.source.close();

        match result {
            Ok(stop) => {
                let reason = match stop {
                    Stop::Cancelled => "cancelled",
                    Stop::ReceiversGone => "receivers dropped",
                };
                info!(
                    reason,
                    lines_read = stats.lines_read,
                    lines_matched = stats.lines_matched,
                    events_sent = stats.events_sent,
                    "Pipeline stopped"
                );
                Ok(stats)
            }
            Err(e) => {
                error!(source = %self.source.description(), error = %e, "Pipeline failed");
                Err(e)
            }
        }
    }

    async fn follow(
        &mut self,
        tx: &StatusSender,
        cancel: &CancellationToken,
        stats: &mut PipelineStats,
    ) -> Result<Stop, MonitorError> {
        loop {
            if cancel.is_cancelled() {
                return Ok(Stop::Cancelled);
            }

            match self.source.poll_line()? {
                Some(line) => {
                    stats.lines_read += 1;
                    if !self.process_line(&line, tx, stats) {
                        return Ok(Stop::ReceiversGone);
                    }
                    tokio::task::yield_now().await;
                }
                None => {
                    trace!("No new data, waiting");
                    tokio::select! {
                        _ = cancel.cancelled() => return Ok(Stop::Cancelled),
                        _ = tokio::time::sleep(self.poll_interval) => {}
                    }
                }
            }
        }
    }

    /// Extract, evaluate and enqueue. Returns false once nobody is listening.
    fn process_line(&self, line: &str, tx: &StatusSender, stats: &mut PipelineStats) -> bool {
        if !self.extractor.matches_component(line) {
            return true;
        }
        stats.lines_matched += 1;

        for sample in self.extractor.extract(line) {
            let event = evaluate_sample(&self.thresholds, &sample);
            match event.status {
                Status::Crit => warn!(
                    service = %event.service_name,
                    value = event.metric_value,
                    detail = %event.detail,
                    "Metric over limit"
                ),
                Status::Unknown => debug!(
                    service = %event.service_name,
                    line = %sample.line,
                    "Unknown metric"
                ),
                Status::Ok => {}
            }

            if tx.send(event).is_err() {
                debug!("All status receivers dropped");
                return false;
            }
            stats.events_sent += 1;
        }
        true
    }
}
