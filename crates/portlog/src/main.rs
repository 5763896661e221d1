//! portlog - Serial byte-stream capture to append-only storage
//!
//! Reads a byte stream from a device node or file, frames each read as a
//! timestamped line, buffers it through a growable byte queue, and appends
//! it to a log file in batched, chunked writes.
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (/dev/ttyUSB0 -> capture.log)
//! portlog
//!
//! # Explicit config and overrides
//! portlog --config configs/example.toml
//! portlog --source /dev/ttyACM0 --output sessions/boot.log
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use portlog_buffer::BufferConfig;
use portlog_config::{Config, WriteFailureMode};
use portlog_pipeline::{Pipeline, PipelineConfig, WriteFailurePolicy};
use portlog_sinks::FileSink;
use portlog_sources::{capture_into, CaptureConfig};

/// portlog - Serial byte-stream capture to append-only storage
#[derive(Parser, Debug)]
#[command(name = "portlog")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "portlog.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config
    #[arg(short, long)]
    log_level: Option<String>,

    /// Capture source path; overrides the config
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Output file path; overrides the config
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing file at the default location just means "all defaults";
    // an explicit --config that does not exist is an error.
    let mut config = if cli.config.exists() || cli.config != PathBuf::from("portlog.toml") {
        Config::from_file(&cli.config)
            .with_context(|| format!("loading config '{}'", cli.config.display()))?
    } else {
        Config::default()
    };

    if let Some(source) = &cli.source {
        config.source.path = source.to_string_lossy().into_owned();
    }
    if let Some(output) = &cli.output {
        config.sink.path = output.to_string_lossy().into_owned();
    }

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or_else(|| config.log.level.as_str());
    init_logging(level)?;

    run(config).await
}

async fn run(config: Config) -> Result<()> {
    let sink = FileSink::open(&config.sink.path)
        .with_context(|| format!("opening output '{}'", config.sink.path))?;
    let (producer, pipeline) = Pipeline::start(pipeline_config(&config), Box::new(sink));

    let reader = tokio::fs::File::open(&config.source.path)
        .await
        .with_context(|| format!("opening source '{}'", config.source.path))?;
    tracing::info!(
        source = %config.source.path,
        output = %config.sink.path,
        "capture session started"
    );

    let capture_config = CaptureConfig {
        read_chunk: config.source.read_chunk,
        max_read_chunk: config.source.max_read_chunk,
        timestamps: config.source.timestamps,
    };
    let cancel = CancellationToken::new();
    let mut capture = tokio::spawn({
        let cancel = cancel.clone();
        async move { capture_into(reader, &producer, capture_config, cancel).await }
    });

    let captured = tokio::select! {
        res = &mut capture => res,
        _ = wait_for_shutdown() => {
            tracing::info!("shutdown signal received");
            cancel.cancel();
            capture.await
        }
    };
    match captured {
        Ok(Ok(bytes)) => tracing::info!(bytes, "capture finished"),
        Ok(Err(e)) => tracing::error!(error = %e, "capture failed"),
        Err(e) => tracing::error!(error = %e, "capture task panicked"),
    }

    let snapshot = pipeline.shutdown().await;
    tracing::info!(
        bytes_pushed = snapshot.bytes_pushed,
        bytes_written = snapshot.bytes_written,
        flushes = snapshot.flushes,
        write_errors = snapshot.write_errors,
        bytes_dropped = snapshot.bytes_dropped,
        queue_grows = snapshot.queue_grows,
        "capture session stopped"
    );

    Ok(())
}

/// Map the file config onto the pipeline's runtime config.
fn pipeline_config(config: &Config) -> PipelineConfig {
    PipelineConfig {
        buffer: BufferConfig {
            initial_capacity: config.buffer.initial_capacity,
            resize_step: config.buffer.resize_step,
            resize_threshold: config.buffer.resize_threshold,
            max_capacity: config.buffer.max_capacity,
        },
        batch_capacity: config.pipeline.batch_capacity,
        flush_interval: Duration::from_millis(config.pipeline.flush_interval_ms),
        drain_wait: Duration::from_millis(config.pipeline.drain_wait_ms),
        chunk_size: config.pipeline.chunk_size,
        max_write_retries: config.pipeline.max_write_retries,
        retry_delay: Duration::from_millis(config.pipeline.retry_delay_ms),
        on_write_failure: match config.pipeline.on_write_failure {
            WriteFailureMode::Requeue => WriteFailurePolicy::Requeue,
            WriteFailureMode::Drop => WriteFailurePolicy::Drop,
        },
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
