pub mod max31723;
pub mod mock_spi;
pub mod rppal_spi;
pub mod spi_bus;
pub mod types;

// Re-export the main types that users need
pub use max31723::{Register, RegisterDump, SensorRegisterReader, Temperature};
pub use spi_bus::{BusGuard, SpiBus, SpiPort};
pub use types::{BusConfig, DriverError};
