//! Common types for the SPI sensor drivers

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// SPI bus configuration applied once after the bus is acquired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Clock rate in Hz
    pub baud_rate: u32,
    /// Clock idle level (CPOL), 0 or 1
    pub polarity: u8,
    /// Sampling edge (CPHA), 0 or 1
    pub phase: u8,
    /// SPI controller index on the host
    pub spi_bus: u8,
    /// Hardware chip select line
    pub slave_select: u8,
    /// The MAX31723 CE input is active high
    pub ss_active_high: bool,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            baud_rate: 1_000_000,
            polarity: 0,
            phase: 1,
            spi_bus: 0,
            slave_select: 0,
            ss_active_high: true,
        }
    }
}

impl BusConfig {
    /// Check the clock parameters before they reach a port.
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.baud_rate == 0 {
            return Err(DriverError::ConfigurationError(
                "Baud rate must be greater than 0".to_string(),
            ));
        }
        if self.polarity > 1 {
            return Err(DriverError::ConfigurationError(format!(
                "Invalid clock polarity: {}. Supported: 0, 1",
                self.polarity
            )));
        }
        if self.phase > 1 {
            return Err(DriverError::ConfigurationError(format!(
                "Invalid clock phase: {}. Supported: 0, 1",
                self.phase
            )));
        }
        Ok(())
    }

    /// Standard SPI mode number (0-3) for this polarity/phase pair.
    pub fn mode(&self) -> u8 {
        (self.polarity << 1) | self.phase
    }
}

/// Errors that can occur in sensor drivers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriverError {
    /// SPI communication error
    #[error("SPI error: {0}")]
    SpiError(String),
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    /// Timeout error
    #[error("Timeout error: {0}")]
    TimeoutError(String),
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
    /// Hardware not found
    #[error("Hardware not found: {0}")]
    HardwareNotFound(String),
}

impl From<rppal::spi::Error> for DriverError {
    fn from(err: rppal::spi::Error) -> Self {
        DriverError::SpiError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_mode_one_at_one_megahertz() {
        let config = BusConfig::default();
        assert_eq!(config.baud_rate, 1_000_000);
        assert_eq!(config.polarity, 0);
        assert_eq!(config.phase, 1);
        assert_eq!(config.mode(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mode_follows_polarity_and_phase() {
        let mut config = BusConfig::default();
        config.polarity = 1;
        config.phase = 1;
        assert_eq!(config.mode(), 3);
        config.phase = 0;
        assert_eq!(config.mode(), 2);
    }

    #[test]
    fn rejects_out_of_range_clock_settings() {
        let bad_phase = BusConfig { phase: 2, ..Default::default() };
        assert!(matches!(bad_phase.validate(), Err(DriverError::ConfigurationError(_))));

        let bad_polarity = BusConfig { polarity: 3, ..Default::default() };
        assert!(matches!(bad_polarity.validate(), Err(DriverError::ConfigurationError(_))));

        let no_clock = BusConfig { baud_rate: 0, ..Default::default() };
        assert!(matches!(no_clock.validate(), Err(DriverError::ConfigurationError(_))));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: BusConfig = serde_json::from_str(r#"{ "baud_rate": 500000 }"#).unwrap();
        assert_eq!(config.baud_rate, 500_000);
        assert_eq!(config.phase, 1);
        assert!(config.ss_active_high);
    }
}
