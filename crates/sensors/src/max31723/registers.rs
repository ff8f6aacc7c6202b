//! Register addresses for the MAX31723.

/// Byte clocked out after the address while the sensor drives its data line.
pub const DUMMY_BYTE: u8 = 0xFF;

/// Bytes per register transaction: address + one data byte.
pub const FRAME_LEN: usize = 2;

// Read addresses (bit 7 clear selects a read)
pub const STATUS_ADDR: u8 = 0x00;
pub const TEMP_LSB_ADDR: u8 = 0x01;
pub const TEMP_MSB_ADDR: u8 = 0x02;

/// Registers read by the status/temperature dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Status,
    TemperatureMsb,
    TemperatureLsb,
}

impl Register {
    /// Read order used for a full dump.
    pub const DUMP_ORDER: [Register; 3] = [
        Register::Status,
        Register::TemperatureMsb,
        Register::TemperatureLsb,
    ];

    pub fn address(self) -> u8 {
        match self {
            Register::Status => STATUS_ADDR,
            Register::TemperatureMsb => TEMP_MSB_ADDR,
            Register::TemperatureLsb => TEMP_LSB_ADDR,
        }
    }

    /// Label printed in front of the register value.
    pub fn label(self) -> &'static str {
        match self {
            Register::Status => "MAX31723 STATUS",
            Register::TemperatureMsb => "Temperature MSB",
            Register::TemperatureLsb => "Temperature LSB",
        }
    }
}
