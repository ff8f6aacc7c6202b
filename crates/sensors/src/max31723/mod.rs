//! MAX31723 digital thermometer over SPI.

pub mod registers;
pub mod reader;
pub mod report;

#[cfg(test)]
mod tests;

pub use registers::Register;
pub use reader::{register_frame, register_value, SensorRegisterReader};
pub use report::{RegisterDump, Temperature};
