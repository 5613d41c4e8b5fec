//! Configuration model for the QMC5883L
//!
//! Output data rate, full-scale range and over-sample ratio each accept a
//! small fixed set of values. Every legal value maps to a fixed bit
//! pattern inside Control Register 1; the mapping tables below are the
//! single source of truth for both validation and encoding.

use core::fmt;

/// Operating mode bits (Control 1, bits 1:0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Standby mode (no measurements)
    Standby = 0x00,
    /// Continuous measurement mode
    Continuous = 0x01,
}

/// Output data rate bits (Control 1, bits 3:2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OutputDataRate {
    /// 10 Hz
    Hz10 = 0x00,
    /// 50 Hz
    Hz50 = 0x04,
    /// 100 Hz
    Hz100 = 0x08,
    /// 200 Hz
    Hz200 = 0x0C,
}

/// Full-scale range bits (Control 1, bits 5:4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Range {
    /// ±2 Gauss
    G2 = 0x00,
    /// ±8 Gauss
    G8 = 0x10,
}

/// Over-sample ratio bits (Control 1, bits 7:6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OverSampleRatio {
    /// 512 internal samples per output
    X512 = 0x00,
    /// 256 internal samples per output
    X256 = 0x40,
    /// 128 internal samples per output
    X128 = 0x80,
    /// 64 internal samples per output
    X64 = 0xC0,
}

/// ODR value (Hz) to bit-pattern mapping, ascending by value
const ODR_TABLE: [(u16, OutputDataRate); 4] = [
    (10, OutputDataRate::Hz10),
    (50, OutputDataRate::Hz50),
    (100, OutputDataRate::Hz100),
    (200, OutputDataRate::Hz200),
];

/// Range value (Gauss) to bit-pattern mapping, ascending by value
const RANGE_TABLE: [(u8, Range); 2] = [(2, Range::G2), (8, Range::G8)];

/// OSR value to bit-pattern mapping, ascending by value
const OSR_TABLE: [(u16, OverSampleRatio); 4] = [
    (64, OverSampleRatio::X64),
    (128, OverSampleRatio::X128),
    (256, OverSampleRatio::X256),
    (512, OverSampleRatio::X512),
];

impl Mode {
    /// Bit pattern within Control Register 1
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub(crate) const fn field(self) -> u8 {
        self as u8
    }
}

impl OutputDataRate {
    /// Look up the rate for a value in Hz
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Odr`] for any value outside
    /// {10, 50, 100, 200}.
    pub fn from_hz(hz: u16) -> Result<Self, ConfigError> {
        ODR_TABLE
            .iter()
            .find(|(value, _)| *value == hz)
            .map(|(_, odr)| *odr)
            .ok_or(ConfigError::Odr(hz))
    }

    /// Rate in Hz
    #[must_use]
    pub const fn hz(self) -> u16 {
        match self {
            Self::Hz10 => 10,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
            Self::Hz200 => 200,
        }
    }

    /// Bit pattern within Control Register 1
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub(crate) const fn field(self) -> u8 {
        (self as u8) >> 2
    }
}

impl Range {
    /// Look up the range for a value in Gauss
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Range`] for any value outside {2, 8}.
    pub fn from_gauss(gauss: u8) -> Result<Self, ConfigError> {
        RANGE_TABLE
            .iter()
            .find(|(value, _)| *value == gauss)
            .map(|(_, rng)| *rng)
            .ok_or(ConfigError::Range(gauss))
    }

    /// Full-scale range in Gauss
    #[must_use]
    pub const fn gauss(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G8 => 8,
        }
    }

    /// Sensitivity in LSB counts per Gauss for this range
    #[must_use]
    pub const fn counts_per_gauss(self) -> f64 {
        match self {
            Self::G2 => 12000.0,
            Self::G8 => 3000.0,
        }
    }

    /// Bit pattern within Control Register 1
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub(crate) const fn field(self) -> u8 {
        (self as u8) >> 4
    }
}

impl OverSampleRatio {
    /// Look up the over-sample ratio for a raw ratio value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Osr`] for any value outside
    /// {64, 128, 256, 512}.
    pub fn from_ratio(ratio: u16) -> Result<Self, ConfigError> {
        OSR_TABLE
            .iter()
            .find(|(value, _)| *value == ratio)
            .map(|(_, osr)| *osr)
            .ok_or(ConfigError::Osr(ratio))
    }

    /// Number of internal samples averaged by the chip
    #[must_use]
    pub const fn ratio(self) -> u16 {
        match self {
            Self::X512 => 512,
            Self::X256 => 256,
            Self::X128 => 128,
            Self::X64 => 64,
        }
    }

    /// Bit pattern within Control Register 1
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub(crate) const fn field(self) -> u8 {
        (self as u8) >> 6
    }
}

/// Driver configuration
///
/// Built before the driver initializes the device and treated as
/// immutable afterwards. The fallible `with_*` methods take raw numeric
/// values and reject anything outside the documented legal sets, so a
/// caller can recover from bad input instead of aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Operating mode
    pub mode: Mode,
    /// Output data rate
    pub odr: OutputDataRate,
    /// Full-scale range
    pub range: Range,
    /// Over-sample ratio
    pub osr: OverSampleRatio,
}

impl Default for Config {
    /// Continuous mode, 50 Hz, ±2 Gauss, OSR 512
    fn default() -> Self {
        Self {
            mode: Mode::Continuous,
            odr: OutputDataRate::Hz50,
            range: Range::G2,
            osr: OverSampleRatio::X512,
        }
    }
}

impl Config {
    /// Set the output data rate from a value in Hz
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Odr`] if `hz` is not one of
    /// {10, 50, 100, 200}.
    pub fn with_odr_hz(mut self, hz: u16) -> Result<Self, ConfigError> {
        self.odr = OutputDataRate::from_hz(hz)?;
        Ok(self)
    }

    /// Set the full-scale range from a value in Gauss
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Range`] if `gauss` is not one of {2, 8}.
    pub fn with_range_gauss(mut self, gauss: u8) -> Result<Self, ConfigError> {
        self.range = Range::from_gauss(gauss)?;
        Ok(self)
    }

    /// Set the over-sample ratio from a raw ratio value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Osr`] if `ratio` is not one of
    /// {64, 128, 256, 512}.
    pub fn with_osr(mut self, ratio: u16) -> Result<Self, ConfigError> {
        self.osr = OverSampleRatio::from_ratio(ratio)?;
        Ok(self)
    }

    /// Set the operating mode
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Encode Control Register 1 as the OR of the four field patterns
    ///
    /// The fields occupy disjoint bit positions, so the OR is lossless.
    #[must_use]
    pub const fn control1_bits(&self) -> u8 {
        self.mode.bits() | self.odr.bits() | self.range.bits() | self.osr.bits()
    }
}

/// An unsupported configuration value
///
/// The `Display` output enumerates the legal values for the offending
/// option in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unsupported output data rate (contains the rejected value in Hz)
    Odr(u16),
    /// Unsupported range (contains the rejected value in Gauss)
    Range(u8),
    /// Unsupported over-sample ratio (contains the rejected value)
    Osr(u16),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Odr(hz) => {
                write!(f, "ODR {hz} is unsupported, must be one of: [")?;
                write_legal_values(f, ODR_TABLE.iter().map(|(value, _)| u32::from(*value)))?;
                write!(f, "]")
            }
            Self::Range(gauss) => {
                write!(f, "range {gauss} is unsupported, must be one of: [")?;
                write_legal_values(f, RANGE_TABLE.iter().map(|(value, _)| u32::from(*value)))?;
                write!(f, "]")
            }
            Self::Osr(ratio) => {
                write!(f, "OSR {ratio} is unsupported, must be one of: [")?;
                write_legal_values(f, OSR_TABLE.iter().map(|(value, _)| u32::from(*value)))?;
                write!(f, "]")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

fn write_legal_values(
    f: &mut fmt::Formatter<'_>,
    values: impl Iterator<Item = u32>,
) -> fmt::Result {
    for (i, value) in values.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}
