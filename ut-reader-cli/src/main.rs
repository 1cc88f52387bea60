use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ut_reader_lib::constants::DEFAULT_BAUD_RATE;
use ut_reader_lib::{FrameReader, OutputConfig, Renderer, SerialSettings, capture};

/// Log measurements streamed by a UNI-T multimeter over its serial cable.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Serial device the meter is attached to (e.g., /dev/ttyUSB0).
    #[arg(short, long)]
    device: String,
    /// Baud rate.
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,
    /// Custom strftime-style timestamp format, default is %Y/%m/%d %H:%M:%S.
    #[arg(short = 'f', long = "format")]
    time_format: Option<String>,
    /// Use Unix timestamps instead of date/time.
    #[arg(short, long)]
    unix_time: bool,
    /// Separate fields with commas (CSV) instead of tabs.
    #[arg(short, long)]
    csv: bool,
    /// Don't print measurement units.
    #[arg(short, long)]
    no_units: bool,
    /// Optional path to a file to write logs to, in addition to stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn setup_logging(log_file_path: Option<PathBuf>, verbosity: &Verbosity<WarnLevel>) -> Result<Option<WorkerGuard>> {
    // stdout carries measurements only
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = if let Some(ref path) = log_file_path {
        let log_file =
            File::create(path).with_context(|| format!("Failed to create log file at: {:?}", path))?;
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(log_file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .with_target(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file_path {
        info!("Logging to file: {:?}", path);
    }

    Ok(guard)
}

fn output_config(cli: &Cli) -> Result<OutputConfig> {
    let mut config = OutputConfig::default()
        .time_format(cli.time_format.as_deref())
        .context("Bad timestamp format")?;
    if cli.unix_time {
        config = config.epoch_seconds();
    }
    if cli.csv {
        config = config.csv();
    }
    if cli.no_units {
        config = config.no_units();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_file.clone(), &cli.verbose)?;
    let config = output_config(&cli)?;

    let settings = SerialSettings::new(&cli.device).with_baud_rate(cli.baud);
    println!("Serial device {} with baud rate = {}", settings.device, settings.baud_rate);

    let port = match settings.open() {
        Ok(port) => port,
        Err(e) => {
            eprintln!("Couldn't open device {}, error: {}", settings.device, e);
            process::exit(1);
        }
    };

    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, stopping capture.");
            flag.store(true, Ordering::Relaxed);
        }
    });

    println!("# Starting capture, press Ctrl-C to stop");
    let result = capture(
        FrameReader::new(port),
        Renderer::new(&config),
        &mut io::stdout(),
        &mut io::stderr(),
        stop,
    )
    .await;
    match &result {
        Ok(stats) => info!(measurements = stats.measurements, dropped = stats.dropped, "Capture stopped"),
        Err(e) => eprintln!("Data capture failed, error: {}", e),
    }
    println!("\n# Capture finished");

    if result.is_err() {
        process::exit(1);
    }
    Ok(())
}
