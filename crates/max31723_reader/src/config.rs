use std::path::Path;
use std::time::Duration;

use sensors::{BusConfig, DriverError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configuration for the register reader
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// SPI settings applied after the bus is acquired
    pub bus: BusConfig,
    /// How long to wait for the bus; `null` spins forever
    pub lock_timeout_ms: Option<u64>,
    /// Re-read the temperature at this period after the first dump
    pub watch_interval_secs: Option<u64>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            bus: BusConfig::default(),
            lock_timeout_ms: Some(1000),
            watch_interval_secs: None,
        }
    }
}

impl ReaderConfig {
    pub fn lock_timeout(&self) -> Option<Duration> {
        self.lock_timeout_ms.map(Duration::from_millis)
    }

    pub fn watch_interval(&self) -> Option<Duration> {
        self.watch_interval_secs.map(Duration::from_secs)
    }
}

/// Load reader configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<ReaderConfig, DriverError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| DriverError::IoError(format!("Could not read '{}': {}", path.display(), e)))?;
    let config: ReaderConfig = serde_json::from_str(&contents).map_err(|e| {
        DriverError::ConfigurationError(format!("Could not parse '{}': {}", path.display(), e))
    })?;
    config.bus.validate()?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
