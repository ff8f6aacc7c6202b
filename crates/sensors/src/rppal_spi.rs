//! `SpiPort` backed by the Linux spidev interface through rppal.

use log::{debug, info};
use rppal::spi::{Bus, Mode, Polarity, SlaveSelect, Spi};

use crate::spi_bus::SpiPort;
use crate::types::{BusConfig, DriverError};

/// SPI implementation using rppal
pub struct RppalSpi {
    spi: Spi,
}

impl RppalSpi {
    /// Open the controller and chip select named in `config`.
    ///
    /// Clock and mode are applied here and again by `configure`, so the
    /// port is usable even if the caller skips configuration.
    pub fn open(config: &BusConfig) -> Result<Self, DriverError> {
        config.validate()?;
        let bus = bus_from_index(config.spi_bus)?;
        let slave_select = slave_select_from_index(config.slave_select)?;
        let mode = mode_from_config(config)?;
        let spi = Spi::new(bus, slave_select, config.baud_rate, mode).map_err(|e| {
            DriverError::HardwareNotFound(format!("{:?}/{:?}: {}", bus, slave_select, e))
        })?;
        info!("Opened SPI {:?} with {:?}", bus, slave_select);
        Ok(Self { spi })
    }
}

impl SpiPort for RppalSpi {
    fn configure(&mut self, config: &BusConfig) -> Result<(), DriverError> {
        self.spi.set_clock_speed(config.baud_rate)?;
        let mode = mode_from_config(config)?;
        self.spi.set_mode(mode)?;
        let polarity = if config.ss_active_high {
            Polarity::ActiveHigh
        } else {
            Polarity::ActiveLow
        };
        self.spi.set_ss_polarity(polarity)?;
        debug!("rppal SPI set to {} Hz, {:?}, SS {:?}", config.baud_rate, mode, polarity);
        Ok(())
    }

    fn transfer(&mut self, read_buffer: &mut [u8], write_buffer: &[u8]) -> Result<(), DriverError> {
        let n = self.spi.transfer(read_buffer, write_buffer)?;
        if n != write_buffer.len() {
            return Err(DriverError::SpiError(format!(
                "Short transfer: {} of {} bytes",
                n,
                write_buffer.len()
            )));
        }
        Ok(())
    }
}

fn bus_from_index(index: u8) -> Result<Bus, DriverError> {
    match index {
        0 => Ok(Bus::Spi0),
        1 => Ok(Bus::Spi1),
        2 => Ok(Bus::Spi2),
        _ => Err(DriverError::ConfigurationError(format!("Invalid SPI bus: {}", index))),
    }
}

fn slave_select_from_index(index: u8) -> Result<SlaveSelect, DriverError> {
    match index {
        0 => Ok(SlaveSelect::Ss0),
        1 => Ok(SlaveSelect::Ss1),
        2 => Ok(SlaveSelect::Ss2),
        _ => Err(DriverError::ConfigurationError(format!("Invalid CS pin: {}", index))),
    }
}

fn mode_from_config(config: &BusConfig) -> Result<Mode, DriverError> {
    match config.mode() {
        0 => Ok(Mode::Mode0),
        1 => Ok(Mode::Mode1),
        2 => Ok(Mode::Mode2),
        3 => Ok(Mode::Mode3),
        other => Err(DriverError::ConfigurationError(format!("Invalid SPI mode: {}", other))),
    }
}
