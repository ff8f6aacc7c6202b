//! Reads the MAX31723 status and temperature registers and prints them.

pub mod config;

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use sensors::max31723::report::{temperature_line, write_decoded, write_report};
use sensors::{RegisterDump, SensorRegisterReader, SpiBus, SpiPort};
use tracing::info;

pub use config::{load_config, ReaderConfig};

/// Register values served by `--mock`.
pub const MOCK_REGISTERS: [(u8, u8); 3] = [(0x00, 0x40), (0x02, 0x1C), (0x01, 0x80)];

/// Output options layered on top of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Also print bit dumps and the decoded temperature
    pub decode: bool,
    /// Overrides `watch_interval_secs` from the config
    pub watch_interval: Option<Duration>,
    /// Stop watching after this many temperature readings
    pub count: Option<u64>,
}

/// Acquire the bus, configure it, dump the registers to `out`, then
/// optionally keep polling the temperature.
pub fn run<P: SpiPort, W: Write>(
    config: &ReaderConfig,
    options: &RunOptions,
    port: P,
    out: &mut W,
) -> anyhow::Result<RegisterDump> {
    let bus = SpiBus::new(port);
    let guard = match config.lock_timeout() {
        Some(timeout) => bus.acquire_bus_timeout(timeout)?,
        None => bus.acquire_bus(),
    };

    let mut reader = SensorRegisterReader::new(guard);
    reader
        .configure(&config.bus)
        .context("Failed to configure SPI bus")?;

    let dump = reader.read_all().context("Failed to read MAX31723 registers")?;
    write_report(out, &dump)?;
    if options.decode {
        write_decoded(out, &dump)?;
    }

    let interval = options.watch_interval.or_else(|| config.watch_interval());
    if let Some(interval) = interval {
        info!("Polling temperature every {:?}", interval);
        let mut taken = 0u64;
        while options.count.map_or(true, |limit| taken < limit) {
            thread::sleep(interval);
            let temperature = reader
                .read_temperature()
                .context("Failed to read MAX31723 temperature")?;
            writeln!(out, "{}", temperature_line(&temperature))?;
            out.flush()?;
            taken += 1;
        }
    }

    Ok(dump)
}
