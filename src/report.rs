//! Status consumers: drain the delivery channel and report each event.

use std::io::{self, Write};

use anyhow::Result;
use async_trait::async_trait;
use hopwatch_types::StatusEvent;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::pipeline::StatusReceiver;

/// Output format for printed status events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per event.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// A sink that accepts status events one at a time, in delivery order.
#[async_trait]
pub trait Reporter: Send {
    /// Report a single event.
    async fn report(&mut self, event: &StatusEvent) -> Result<()>;
}

/// Writes each event to a writer (stdout by default).
#[derive(Debug)]
pub struct PrintReporter<W> {
    writer: W,
    format: OutputFormat,
}

impl PrintReporter<io::Stdout> {
    /// Print to standard output.
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write + Send> PrintReporter<W> {
    /// Print to an arbitrary writer.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: Write + Send> Reporter for PrintReporter<W> {
    async fn report(&mut self, event: &StatusEvent) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "{}", event)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, event)?;
                writeln!(self.writer)?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Counters returned when a consumer stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    /// Events the reporter accepted.
    pub reported: u64,
    /// Events the reporter failed on.
    pub failed: u64,
}

/// Drain `rx` into `reporter` until the channel closes or `cancel` fires.
///
/// Events already queued are reported before a cancellation is honoured.
/// A failing reporter does not stop the loop; the event is logged and
/// counted as failed.
pub async fn run_consumer<R>(
    mut rx: StatusReceiver,
    reporter: &mut R,
    cancel: CancellationToken,
) -> ConsumerStats
where
    R: Reporter + ?Sized,
{
    let mut stats = ConsumerStats::default();

    loop {
        let event = tokio::select! {
            biased;
            event = rx.recv() => match event {
                Some(event) => event,
                None => {
                    debug!("Delivery channel closed");
                    break;
                }
            },
            _ = cancel.cancelled() => {
                debug!("Consumer cancelled");
                break;
            }
        };

        match reporter.report(&event).await {
            Ok(()) => stats.reported += 1,
            Err(e) => {
                stats.failed += 1;
                warn!(
                    service = %event.service_name,
                    status = %event.status,
                    error = %e,
                    "Failed to report status event"
                );
            }
        }
    }

    info!(
        reported = stats.reported,
        failed = stats.failed,
        "Status consumer stopped"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::channel;
    use hopwatch_types::Status;

    /// Collects events in memory.
    #[derive(Default)]
    struct Collect(Vec<StatusEvent>);

    #[async_trait]
    impl Reporter for Collect {
        async fn report(&mut self, event: &StatusEvent) -> Result<()> {
            self.0.push(event.clone());
            Ok(())
        }
    }

    /// Rejects every event whose status is not Ok.
    struct RejectNonOk;

    #[async_trait]
    impl Reporter for RejectNonOk {
        async fn report(&mut self, event: &StatusEvent) -> Result<()> {
            if event.is_ok() {
                Ok(())
            } else {
                anyhow::bail!("sink unavailable")
            }
        }
    }

    #[tokio::test]
    async fn test_print_reporter_text() {
        let mut reporter = PrintReporter::new(Vec::new(), OutputFormat::Text);
        reporter
            .report(&StatusEvent::crit("lat", 450.0, "latency at 450 exceeded max limit 400"))
            .await
            .unwrap();
        reporter.report(&StatusEvent::ok("count", 3.0)).await.unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "CRIT lat=450 (latency at 450 exceeded max limit 400)\nOK count=3\n"
        );
    }

    #[tokio::test]
    async fn test_print_reporter_json() {
        let mut reporter = PrintReporter::new(Vec::new(), OutputFormat::Json);
        reporter
            .report(&StatusEvent::unknown("m", 5.0, "no threshold configured for m"))
            .await
            .unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["service_name"], "m");
        assert_eq!(value["status"], "UNKNOWN");
        assert_eq!(value["metric_value"], 5.0);
        assert!(out.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_consumer_preserves_order_and_stops_on_close() {
        let (tx, rx) = channel();
        for i in 0..5 {
            tx.send(StatusEvent::ok(format!("m{}", i), i as f64)).unwrap();
        }
        drop(tx);

        let mut collect = Collect::default();
        let stats = run_consumer(rx, &mut collect, CancellationToken::new()).await;

        assert_eq!(stats.reported, 5);
        let names: Vec<_> = collect.0.iter().map(|e| e.service_name.as_str()).collect();
        assert_eq!(names, vec!["m0", "m1", "m2", "m3", "m4"]);
    }

    #[tokio::test]
    async fn test_consumer_stops_on_cancel() {
        let (tx, rx) = channel();
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut collect = Collect::default();
            run_consumer(rx, &mut collect, task_cancel).await
        });

        tx.send(StatusEvent::ok("a", 1.0)).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        cancel.cancel();

        let stats = handle.await.unwrap();
        assert_eq!(stats.reported, 1);
        // Sender is still alive: only the cancellation ended the loop
        drop(tx);
    }

    #[tokio::test]
    async fn test_consumer_drains_queue_before_cancel() {
        let (tx, rx) = channel();
        tx.send(StatusEvent::ok("a", 1.0)).unwrap();
        tx.send(StatusEvent::ok("b", 2.0)).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut collect = Collect::default();
        let stats = run_consumer(rx, &mut collect, cancel).await;
        assert_eq!(stats.reported, 2);
    }

    #[tokio::test]
    async fn test_reporter_failure_does_not_stop_consumer() {
        let (tx, rx) = channel();
        tx.send(StatusEvent::crit("a", 9.0, "too high")).unwrap();
        tx.send(StatusEvent::ok("b", 1.0)).unwrap();
        tx.send(StatusEvent::new("c", Status::Unknown, 1.0, "?")).unwrap();
        drop(tx);

        let stats = run_consumer(rx, &mut RejectNonOk, CancellationToken::new()).await;
        assert_eq!(
            stats,
            ConsumerStats {
                reported: 1,
                failed: 2
            }
        );
    }
}
