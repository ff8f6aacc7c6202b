//! In-memory SPI port that answers like a register-addressed sensor.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::spi_bus::SpiPort;
use crate::types::{BusConfig, DriverError};

/// Mock implementation of an SPI port.
///
/// A transfer is answered from the scripted queue when one is pending,
/// otherwise from the register map: the byte clocked in at index 1 is the
/// value stored at the address sent in byte 0.
#[derive(Debug, Default)]
pub struct MockSpi {
    registers: HashMap<u8, u8>,
    scripted: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
    config: Option<BusConfig>,
    fail_next: bool,
}

impl MockSpi {
    /// Create a new MockSpi instance with an empty register map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock preloaded with `(address, value)` pairs.
    pub fn with_registers<I>(registers: I) -> Self
    where
        I: IntoIterator<Item = (u8, u8)>,
    {
        Self {
            registers: registers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn set_register(&mut self, address: u8, value: u8) {
        self.registers.insert(address, value);
    }

    /// Queue a raw receive buffer for the next transfer.
    pub fn push_response(&mut self, rx: &[u8]) {
        self.scripted.push_back(rx.to_vec());
    }

    /// Make the next transfer return an SPI error.
    pub fn fail_next_transfer(&mut self) {
        self.fail_next = true;
    }

    /// Every frame written so far, oldest first.
    pub fn sent_frames(&self) -> &[Vec<u8>] {
        &self.sent
    }

    pub fn applied_config(&self) -> Option<&BusConfig> {
        self.config.as_ref()
    }
}

impl SpiPort for MockSpi {
    fn configure(&mut self, config: &BusConfig) -> Result<(), DriverError> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn transfer(&mut self, read_buffer: &mut [u8], write_buffer: &[u8]) -> Result<(), DriverError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(DriverError::SpiError("mock transfer failure".to_string()));
        }
        self.sent.push(write_buffer.to_vec());

        if let Some(rx) = self.scripted.pop_front() {
            read_buffer.fill(0);
            let n = rx.len().min(read_buffer.len());
            read_buffer[..n].copy_from_slice(&rx[..n]);
            return Ok(());
        }

        read_buffer.fill(0);
        if let (Some(&address), Some(slot)) = (write_buffer.first(), read_buffer.get_mut(1)) {
            *slot = self.registers.get(&address).copied().unwrap_or(0);
            debug!("Mock SPI answered register 0x{:02X} with 0x{:02X}", address, *slot);
        }
        Ok(())
    }
}
