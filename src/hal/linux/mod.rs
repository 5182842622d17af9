//! Embedded Linux implementations of the device traits.
//!
//! The board exposes each device as a node under `/dev`:
//!
//! - **Tach**: pulse counter char device, read-only
//! - **LCD**: two-line character display, ioctl requests only
//! - **Tilt**: angle sensor on spidev
//!
//! Every handle owns its file descriptor and closes it on drop.

mod lcd;
mod tach;
mod tilt;

pub mod signal;

pub use lcd::LinuxLcd;
pub use tach::LinuxTach;
pub use tilt::LinuxTilt;

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::app::DeviceProvider;
use crate::config::Config;
use crate::error::{Device, Error};

/// Opens the real device nodes named in [`Config::devices`].
#[derive(Debug, Default)]
pub struct LinuxDevices;

impl LinuxDevices {
    /// Creates the provider.
    pub fn new() -> Self {
        Self
    }
}

fn open_error(device: Device, e: std::io::Error) -> Error {
    Error::Open {
        device,
        detail: e.to_string(),
    }
}

impl DeviceProvider for LinuxDevices {
    type Tach = LinuxTach;
    type Lcd = LinuxLcd;
    type Tilt = LinuxTilt;

    fn open_tach(&mut self, config: &Config) -> Result<LinuxTach, Error> {
        LinuxTach::open(config.devices.tach).map_err(|e| open_error(Device::Tach, e))
    }

    fn open_lcd(&mut self, config: &Config) -> Result<LinuxLcd, Error> {
        LinuxLcd::open(config.devices.lcd).map_err(|e| open_error(Device::Lcd, e))
    }

    fn open_tilt(&mut self, config: &Config) -> Result<LinuxTilt, Error> {
        LinuxTilt::open(config.devices.tilt, config.spi)
            .map_err(|e| open_error(Device::Tilt, e))
    }
}

/// Blocking delay backed by `std::thread::sleep`.
///
/// The sleep resumes after a signal, so it always runs its full length.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DevicePaths;
    use std::time::Instant;

    fn config_with(devices: DevicePaths) -> Config {
        Config {
            devices,
            ..Config::default()
        }
    }

    #[test]
    fn missing_nodes_map_to_open_errors() {
        let config = config_with(DevicePaths {
            tach: "/nonexistent/tach",
            lcd: "/nonexistent/lcd",
            tilt: "/nonexistent/tilt",
        });
        let mut devices = LinuxDevices::new();

        assert_eq!(devices.open_tach(&config).unwrap_err().exit_code(), -1);
        assert_eq!(devices.open_lcd(&config).unwrap_err().exit_code(), -4);
        assert_eq!(devices.open_tilt(&config).unwrap_err().exit_code(), -6);
    }

    #[test]
    fn long_path_never_opens_its_prefix() {
        // A 64-byte path that exists, and a longer one that shares its prefix
        let dir = std::env::temp_dir();
        let stem = format!("{}/tach-lcd-{}-", dir.display(), std::process::id());
        let short = format!("{:x<64}", stem);
        assert_eq!(short.len(), 64);
        std::fs::write(&short, 0i32.to_ne_bytes()).unwrap();

        let long: &'static str = Box::leak(format!("{}-missing", short).into_boxed_str());
        let config = config_with(DevicePaths {
            tach: long,
            ..DevicePaths::default()
        });
        let result = LinuxDevices::new().open_tach(&config);
        std::fs::remove_file(&short).unwrap();

        assert_eq!(result.unwrap_err().exit_code(), -1);
    }

    #[test]
    fn std_delay_sleeps_at_least_requested() {
        let start = Instant::now();
        StdDelay.delay_ms(20);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
