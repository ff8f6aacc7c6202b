//! Register read transactions against a MAX31723.

use log::debug;

use super::registers::{Register, DUMMY_BYTE, FRAME_LEN};
use super::report::{RegisterDump, Temperature};
use crate::spi_bus::{BusGuard, SpiPort};
use crate::types::{BusConfig, DriverError};

/// Outgoing frame for a register read: the address, then a filler byte
/// to clock the value back in.
pub fn register_frame(address: u8) -> [u8; FRAME_LEN] {
    [address, DUMMY_BYTE]
}

/// The register value is the byte received while the filler was sent.
pub fn register_value(rx: &[u8; FRAME_LEN]) -> u8 {
    rx[1]
}

/// Reads MAX31723 registers over an SPI bus it holds exclusively.
pub struct SensorRegisterReader<'a, P: SpiPort> {
    bus: BusGuard<'a, P>,
}

impl<'a, P: SpiPort> SensorRegisterReader<'a, P> {
    pub fn new(bus: BusGuard<'a, P>) -> Self {
        Self { bus }
    }

    /// Apply the bus settings. Call once before the first read.
    pub fn configure(&mut self, config: &BusConfig) -> Result<(), DriverError> {
        self.bus.configure(config)
    }

    /// Read a single register by raw address.
    pub fn read_address(&mut self, address: u8) -> Result<u8, DriverError> {
        let tx = register_frame(address);
        let mut rx = [0u8; FRAME_LEN];
        self.bus.transfer(&tx, &mut rx)?;
        let value = register_value(&rx);
        debug!("Register 0x{:02X} = 0x{:02X}", address, value);
        Ok(value)
    }

    pub fn read_register(&mut self, register: Register) -> Result<u8, DriverError> {
        self.read_address(register.address())
    }

    /// Status, then temperature MSB, then temperature LSB.
    pub fn read_all(&mut self) -> Result<RegisterDump, DriverError> {
        let status = self.read_register(Register::Status)?;
        let temperature_msb = self.read_register(Register::TemperatureMsb)?;
        let temperature_lsb = self.read_register(Register::TemperatureLsb)?;
        Ok(RegisterDump {
            status,
            temperature_msb,
            temperature_lsb,
        })
    }

    pub fn read_temperature(&mut self) -> Result<Temperature, DriverError> {
        let msb = self.read_register(Register::TemperatureMsb)?;
        let lsb = self.read_register(Register::TemperatureLsb)?;
        Ok(Temperature { msb, lsb })
    }

    /// Give the bus back, e.g. to inspect the port.
    pub fn into_bus(self) -> BusGuard<'a, P> {
        self.bus
    }
}
