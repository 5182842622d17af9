//! Compiled-in configuration for devices and timing.
//!
//! Nothing here is read at runtime: [`Config::default()`] is the
//! configuration the binary runs with. Paths are `&'static str` literals, so
//! they reach `open` exactly as written.
//!
//! # Example
//!
//! ```rust
//! use tach_lcd::config::{Config, DevicePaths};
//!
//! let config = Config::default();
//! assert_eq!(config.devices.lcd, "/dev/klcd");
//!
//! // Point at other nodes, e.g. in tests
//! let config = Config {
//!     devices: DevicePaths { tilt: "/dev/spidev0.0", ..DevicePaths::default() },
//!     ..Config::default()
//! };
//! assert_eq!(config.devices.tilt, "/dev/spidev0.0");
//! ```

/// Default tachometer pulse counter device
pub const TACH_DEVICE: &str = "/dev/gpiotach1.0";

/// Default character LCD device
pub const LCD_DEVICE: &str = "/dev/klcd";

/// Default SPI device for the tilt sensor
pub const TILT_DEVICE: &str = "/dev/spidev1.0";

/// Pause between sampling cycles
pub const INTERVAL_MS: u32 = 1000;

/// Complete application configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Device file locations
    pub devices: DevicePaths,
    /// Tilt sensor bus parameters
    pub spi: SpiConfig,
    /// Pause between cycles in milliseconds
    pub interval_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            devices: DevicePaths::default(),
            spi: SpiConfig::default(),
            interval_ms: INTERVAL_MS,
        }
    }
}

/// Device file locations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DevicePaths {
    /// Tachometer pulse counter (read-only byte stream)
    pub tach: &'static str,
    /// Character LCD (ioctl interface)
    pub lcd: &'static str,
    /// Tilt sensor SPI device
    pub tilt: &'static str,
}

impl Default for DevicePaths {
    fn default() -> Self {
        Self {
            tach: TACH_DEVICE,
            lcd: LCD_DEVICE,
            tilt: TILT_DEVICE,
        }
    }
}

/// Parameters for the single tilt sensor transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpiConfig {
    /// Bus clock in Hz
    pub speed_hz: u32,
    /// Word width
    pub bits_per_word: u8,
    /// Delay after the transfer in microseconds
    pub delay_usecs: u16,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            speed_hz: 500_000,
            bits_per_word: 8,
            delay_usecs: 1,
        }
    }
}
