//! Exclusive-ownership SPI bus abstraction.

use std::sync::{Mutex, MutexGuard, TryLockError};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::types::{BusConfig, DriverError};

/// Base trait for SPI port operations (object-safe)
pub trait SpiPort: Send + 'static {
    /// Apply clock rate, mode and chip select settings.
    fn configure(&mut self, config: &BusConfig) -> Result<(), DriverError>;

    /// Transfer data over SPI (simultaneous read/write).
    /// Both buffers have the same length.
    fn transfer(&mut self, read_buffer: &mut [u8], write_buffer: &[u8]) -> Result<(), DriverError>;
}

impl SpiPort for Box<dyn SpiPort> {
    fn configure(&mut self, config: &BusConfig) -> Result<(), DriverError> {
        (**self).configure(config)
    }

    fn transfer(&mut self, read_buffer: &mut [u8], write_buffer: &[u8]) -> Result<(), DriverError> {
        (**self).transfer(read_buffer, write_buffer)
    }
}

/// An SPI port that can be held by at most one owner at a time.
pub struct SpiBus<P: SpiPort> {
    port: Mutex<P>,
}

impl<P: SpiPort> SpiBus<P> {
    pub fn new(port: P) -> Self {
        Self {
            port: Mutex::new(port),
        }
    }

    /// Make a single, non-blocking attempt to take the bus.
    pub fn try_lock(&self) -> Option<BusGuard<'_, P>> {
        match self.port.try_lock() {
            Ok(port) => Some(BusGuard { port }),
            // A panic mid-transfer leaves nothing in the port to repair.
            Err(TryLockError::Poisoned(poisoned)) => Some(BusGuard {
                port: poisoned.into_inner(),
            }),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// Spin until the bus is ours. Never gives up.
    pub fn acquire_bus(&self) -> BusGuard<'_, P> {
        let mut attempts: u64 = 0;
        loop {
            if let Some(guard) = self.try_lock() {
                debug!("SPI bus acquired after {} failed attempts", attempts);
                return guard;
            }
            if attempts == 0 {
                warn!("SPI bus is held elsewhere, spinning until it is released");
            }
            attempts += 1;
            std::hint::spin_loop();
        }
    }

    /// Spin until the bus is ours or `timeout` elapses.
    pub fn acquire_bus_timeout(&self, timeout: Duration) -> Result<BusGuard<'_, P>, DriverError> {
        let deadline = Instant::now() + timeout;
        let mut warned = false;
        loop {
            if let Some(guard) = self.try_lock() {
                return Ok(guard);
            }
            if Instant::now() >= deadline {
                return Err(DriverError::TimeoutError(format!(
                    "SPI bus not released within {} ms",
                    timeout.as_millis()
                )));
            }
            if !warned {
                warn!("SPI bus is held elsewhere, waiting up to {} ms", timeout.as_millis());
                warned = true;
            }
            std::hint::spin_loop();
        }
    }

    /// Consume the bus and hand back the port.
    pub fn into_inner(self) -> P {
        match self.port.into_inner() {
            Ok(port) => port,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Proof of exclusive bus ownership. Dropping it releases the bus.
pub struct BusGuard<'a, P: SpiPort> {
    port: MutexGuard<'a, P>,
}

impl<'a, P: SpiPort> BusGuard<'a, P> {
    /// Validate and apply the bus configuration.
    pub fn configure(&mut self, config: &BusConfig) -> Result<(), DriverError> {
        config.validate()?;
        self.port.configure(config)?;
        info!(
            "SPI bus configured: {} Hz, polarity {}, phase {} (mode {})",
            config.baud_rate,
            config.polarity,
            config.phase,
            config.mode()
        );
        Ok(())
    }

    /// Performs one full-duplex exchange: clocks out `write` while filling `read`.
    pub fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), DriverError> {
        if write.len() != read.len() {
            return Err(DriverError::SpiError(format!(
                "Buffer length mismatch: write {} bytes, read {} bytes",
                write.len(),
                read.len()
            )));
        }
        self.port.transfer(read, write)?;
        debug!("SPI transfer tx={:02X?} rx={:02X?}", write, read);
        Ok(())
    }

    /// Low-level access to the port, mostly for inspecting test doubles.
    pub fn port(&self) -> &P {
        &self.port
    }
}
