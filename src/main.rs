use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use hopwatch::{
    channel, logging, run_consumer, MonitorConfig, OutputFormat, Pipeline, PrintReporter,
};

#[derive(Parser, Debug)]
#[command(name = "hopwatch")]
#[command(about = "Tails a log file and reports latency hops that exceed their limits")]
struct Args {
    /// Path to a TOML config file (HOPWATCH_* environment variables override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file to follow
    #[arg(short, long)]
    logfile: Option<PathBuf>,

    /// Component tag a line must contain to be inspected
    #[arg(long)]
    component: Option<String>,

    /// Wait between polls when no new data is available (e.g., "1s", "250ms")
    #[arg(short, long)]
    poll_interval: Option<String>,

    /// Status event output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(self, config: &mut MonitorConfig) {
        if let Some(logfile) = self.logfile {
            config.logfile = logfile;
        }
        if let Some(component) = self.component {
            config.component = component;
        }
        if let Some(poll_interval) = self.poll_interval {
            config.poll_interval = poll_interval;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level)?;

    let mut config = MonitorConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config))
}

/// Run the pipeline and the default consumer until Ctrl-C or a pipeline failure.
async fn run(config: MonitorConfig) -> Result<()> {
    let pipeline = Pipeline::open(&config)
        .with_context(|| format!("Cannot start monitoring {}", config.logfile.display()))?;

    let (tx, rx) = channel();
    let cancel = CancellationToken::new();

    let producer = tokio::spawn(pipeline.run(tx, cancel.clone()));

    let consumer_cancel = cancel.clone();
    let format = config.format;
    let consumer = tokio::spawn(async move {
        let mut reporter = PrintReporter::stdout(format);
        run_consumer(rx, &mut reporter, consumer_cancel).await
    });

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            signal_cancel.cancel();
        }
    });

    // When the pipeline stops its sender is dropped, so the consumer drains
    // what is left and exits on its own.
    let pipeline_result = producer.await.context("Pipeline task panicked")?;
    let consumer_stats = consumer.await.context("Consumer task panicked")?;

    let stats = pipeline_result?;
    info!(
        lines_read = stats.lines_read,
        events_sent = stats.events_sent,
        reported = consumer_stats.reported,
        "Shut down cleanly"
    );
    Ok(())
}
