//! High-level driver API for the QMC5883L
//!
//! This module provides a user-friendly interface to the QMC5883L sensor,
//! handling the power-on configuration sequence, filtered field readings
//! in Gauss and compass heading derivation.

use crate::config::Config;
use crate::registers::Qmc5883l as RegisterDevice;
use crate::Error;

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

/// Number of raw samples averaged per filtered read
pub const SAMPLES_PER_READ: u32 = 10;

/// Delay between consecutive raw samples during a filtered read
const INTER_SAMPLE_DELAY_MS: u32 = 10;

/// Settle time after soft reset before control registers accept writes
const RESET_SETTLE_MS: u32 = 5;

/// Start of the 6-byte measurement output block
const REG_OUT_X_L: u8 = 0x00;

/// Magnetometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagData {
    /// X-axis magnetic field (raw)
    pub x: i16,
    /// Y-axis magnetic field (raw)
    pub y: i16,
    /// Z-axis magnetic field (raw)
    pub z: i16,
}

/// Magnetometer data in Gauss
///
/// Produced by [`Qmc5883lDriver::read`]: the mean of
/// [`SAMPLES_PER_READ`] raw samples per axis, scaled by the sensitivity
/// of the configured range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagDataGauss {
    /// X-axis magnetic field in Gauss
    pub x: f64,
    /// Y-axis magnetic field in Gauss
    pub y: f64,
    /// Z-axis magnetic field in Gauss
    pub z: f64,
}

/// Main driver for the QMC5883L
///
/// Acquisition methods take `&mut self`, so a filtered read holds
/// exclusive access to the bus handle for its whole duration (all ten
/// raw reads and the delays between them).
pub struct Qmc5883lDriver<I> {
    device: RegisterDevice<I>,
    config: Config,
    initialized: bool,
}

impl<I> Qmc5883lDriver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new QMC5883L driver instance
    ///
    /// This does not touch the device. Call [`init()`](Self::init) after
    /// construction to reset and configure it; acquisition methods
    /// return [`Error::NotInitialized`] until that has succeeded.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            config,
            initialized: false,
        }
    }

    /// The configuration this driver was built with
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize the device
    ///
    /// Runs the strict power-on sequence: soft reset, a 5 ms settle
    /// delay (the device needs time after reset before registers are
    /// writable reliably), the packed Control 1 configuration byte, then
    /// Control 2 with register pointer roll-over enabled.
    ///
    /// A failed write aborts the sequence; no rollback is attempted and
    /// the device is left in an undefined configuration state. The
    /// driver stays unusable for acquisition until a later `init` call
    /// succeeds.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay provider implementing `embedded_hal::delay::DelayNs`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        self.initialized = false;

        // Soft reset restores the default register state
        self.device.control_2().write(|w| {
            w.set_soft_rst(true);
        })?;

        delay.delay_ms(RESET_SETTLE_MS);

        // Commit mode | ODR | RNG | OSR as one packed byte
        let config = self.config;
        self.device.control_1().write(|w| {
            w.set_mode(config.mode.field());
            w.set_odr(config.odr.field());
            w.set_rng(config.range.field());
            w.set_osr(config.osr.field());
        })?;

        // Roll-over lets a block read wrap through the output registers
        self.device.control_2().write(|w| {
            w.set_rol_pnt(true);
        })?;

        self.initialized = true;
        Ok(())
    }

    /// Check whether a new measurement is available
    ///
    /// Reads the DRDY bit of the status register.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        let status = self.device.status().read()?;
        Ok(status.drdy())
    }

    /// Read one raw magnetometer sample
    ///
    /// Returns raw 16-bit values for the X, Y, Z axes from a single
    /// 6-byte block read. No retry is attempted on a bus failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before a successful
    /// [`init()`](Self::init), or a bus error if the block read fails.
    pub fn read_raw(&mut self) -> Result<MagData, Error<I::Error>> {
        self.ensure_initialized()?;

        // Read all 6 bytes atomically to prevent torn reads
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(REG_OUT_X_L, 48, &mut buffer)?;

        // Within each 2-byte pair the device delivers the high byte
        // first. This matches the tested sensor's wire format; do not
        // swap it to the datasheet's nominal order.
        let x = i16::from_be_bytes([buffer[0], buffer[1]]);
        let y = i16::from_be_bytes([buffer[2], buffer[3]]);
        let z = i16::from_be_bytes([buffer[4], buffer[5]]);

        Ok(MagData { x, y, z })
    }

    /// Read an averaged magnetic field measurement in Gauss
    ///
    /// Takes exactly [`SAMPLES_PER_READ`] raw samples with a 10 ms delay
    /// after each, so one call costs at least 100 ms of wall-clock time
    /// beyond bus latency. That is a deliberate trade of responsiveness
    /// for noise reduction. The per-axis sums are accumulated in `i32`,
    /// which cannot overflow across ten 16-bit samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before a successful
    /// [`init()`](Self::init). The first bus failure aborts the whole
    /// call; no partial average is returned.
    pub fn read<D>(&mut self, delay: &mut D) -> Result<MagDataGauss, Error<I::Error>>
    where
        D: DelayNs,
    {
        self.ensure_initialized()?;

        let mut sum_x: i32 = 0;
        let mut sum_y: i32 = 0;
        let mut sum_z: i32 = 0;

        for _ in 0..SAMPLES_PER_READ {
            let sample = self.read_raw()?;
            sum_x += i32::from(sample.x);
            sum_y += i32::from(sample.y);
            sum_z += i32::from(sample.z);
            delay.delay_ms(INTER_SAMPLE_DELAY_MS);
        }

        let samples = f64::from(SAMPLES_PER_READ);
        let counts_per_gauss = self.config.range.counts_per_gauss();

        Ok(MagDataGauss {
            x: f64::from(sum_x) / samples / counts_per_gauss,
            y: f64::from(sum_y) / samples / counts_per_gauss,
            z: f64::from(sum_z) / samples / counts_per_gauss,
        })
    }

    /// Compute the compass heading in degrees, in `[0, 360)`
    ///
    /// Derived from the X/Y components of one averaged reading via
    /// [`read()`](Self::read). No tilt compensation, declination or
    /// calibration offset is applied.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying averaged read unchanged.
    pub fn heading<D>(&mut self, delay: &mut D) -> Result<f64, Error<I::Error>>
    where
        D: DelayNs,
    {
        let data = self.read(delay)?;
        Ok(heading_degrees(data.x, data.y))
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    fn ensure_initialized(&self) -> Result<(), Error<I::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}

/// Heading in degrees, in `[0, 360)`, from horizontal field components
///
/// `atan2(y, x)` converted to degrees, shifted by 360 when negative.
/// Invariant under positive uniform scaling of `(x, y)`.
#[must_use]
pub fn heading_degrees(x: f64, y: f64) -> f64 {
    let radians = libm::atan2(y, x);
    let degrees = radians * 180.0 / core::f64::consts::PI;

    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}
