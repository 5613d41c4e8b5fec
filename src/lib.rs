#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod device;
pub mod interface;
pub mod registers;

// Re-export main types
pub use config::{Config, ConfigError, Mode, OutputDataRate, OverSampleRatio, Range};
pub use device::{heading_degrees, MagData, MagDataGauss, Qmc5883lDriver, SAMPLES_PER_READ};
pub use interface::I2cInterface;

/// QMC5883L I2C address (0x0D)
///
/// The address is fixed at the factory; use [`I2cInterface::default()`]
/// unless the device sits behind an address translator.
pub const I2C_ADDRESS: u8 = 0x0D;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Acquisition attempted before `init` completed successfully
    NotInitialized,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
