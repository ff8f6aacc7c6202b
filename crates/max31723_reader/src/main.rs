use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use max31723_reader::{load_config, run, ReaderConfig, RunOptions, MOCK_REGISTERS};
use sensors::mock_spi::MockSpi;
use sensors::rppal_spi::RppalSpi;
use sensors::SpiPort;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Answer from canned register values instead of real hardware
    #[arg(long)]
    mock: bool,

    /// Also print register bits and the decoded temperature
    #[arg(long)]
    decode: bool,

    /// Keep reading the temperature every N seconds
    #[arg(long, value_name = "SECS")]
    watch: Option<u64>,

    /// Stop watch mode after N readings (interval from --watch or the config)
    #[arg(long)]
    count: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "max31723_reader=info,sensors=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ReaderConfig::default(),
    };

    let port: Box<dyn SpiPort> = if args.mock {
        tracing::info!("Using mock SPI port");
        Box::new(MockSpi::with_registers(MOCK_REGISTERS))
    } else {
        Box::new(RppalSpi::open(&config.bus).context("Failed to open SPI device")?)
    };

    let options = RunOptions {
        decode: args.decode,
        watch_interval: args.watch.map(Duration::from_secs),
        count: args.count,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&config, &options, port, &mut out)?;
    Ok(())
}
