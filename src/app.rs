//! Process-level sequencing: open devices, configure the display, sample,
//! release.
//!
//! [`run`] is everything the binary does between installing the signal
//! handler and exiting. Devices are acquired in a fixed order:
//!
//! 1. tach
//! 2. LCD, then clear + cursor off
//! 3. tilt sensor
//!
//! A failure at any step ends the run with that step's exit code. Devices
//! are plain owned values, so whatever was opened before the failure is
//! dropped (closed) on the way out, exactly once.

use embedded_hal::delay::DelayNs;
use log::{error, info};

use crate::config::Config;
use crate::error::{Error, ExitStatus};
use crate::monitor::{configure_display, Monitor};
use crate::shutdown::ShutdownFlag;
use crate::traits::{LcdDisplay, TachSensor, TiltSensor};

/// Opens the three devices.
///
/// Implementations map their OS errors to [`Error::Open`] for the device in
/// question. Returned handles close themselves on drop.
pub trait DeviceProvider {
    /// Tachometer type.
    type Tach: TachSensor;
    /// Display type.
    type Lcd: LcdDisplay;
    /// Tilt sensor type.
    type Tilt: TiltSensor;

    /// Opens the tachometer.
    fn open_tach(&mut self, config: &Config) -> Result<Self::Tach, Error>;

    /// Opens the display.
    fn open_lcd(&mut self, config: &Config) -> Result<Self::Lcd, Error>;

    /// Opens the tilt sensor.
    fn open_tilt(&mut self, config: &Config) -> Result<Self::Tilt, Error>;
}

type ProviderMonitor<P> = Monitor<
    <P as DeviceProvider>::Tach,
    <P as DeviceProvider>::Lcd,
    <P as DeviceProvider>::Tilt,
>;

/// Opens and configures everything, in order.
pub fn start<P: DeviceProvider>(
    provider: &mut P,
    config: &Config,
) -> Result<ProviderMonitor<P>, Error> {
    let tach = provider.open_tach(config)?;
    let lcd = configure_display(provider.open_lcd(config)?)?;
    let tilt = provider.open_tilt(config)?;

    info!("devices ready");
    Ok(Monitor::new(tach, lcd, tilt, config))
}

/// Runs the whole program against `provider` and returns how it ended.
///
/// Every device opened along the way is released before this returns.
///
/// # Example
///
/// ```rust
/// use core::sync::atomic::AtomicBool;
/// use tach_lcd::app::run;
/// use tach_lcd::hal::{MockDelay, MockDevices, MockLcd, MockTach, MockTilt};
/// use tach_lcd::{Config, ShutdownFlag};
///
/// let mut tach = MockTach::new();
/// tach.queue_pulses(5);
/// let mut devices = MockDevices::new(tach, MockLcd::new(), MockTilt::new());
///
/// let raw = AtomicBool::new(false);
/// let flag = ShutdownFlag::new(&raw);
/// let mut delay = MockDelay::new().with_shutdown_after(1, flag);
///
/// let status = run(&mut devices, &Config::default(), &mut delay, flag);
/// assert_eq!(status.code(), 0);
/// ```
pub fn run<P: DeviceProvider, D: DelayNs>(
    provider: &mut P,
    config: &Config,
    delay: &mut D,
    shutdown: ShutdownFlag<'_>,
) -> ExitStatus {
    match start(provider, config) {
        Ok(mut monitor) => monitor.run(delay, shutdown),
        Err(e) => {
            error!("{}", e);
            ExitStatus::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Device;
    use crate::hal::{release_log, MockDelay, MockDevices, MockLcd, MockTach, MockTilt};
    use crate::message::LcdCommand;
    use core::sync::atomic::AtomicBool;

    #[test]
    fn start_opens_in_order() {
        let mut devices = MockDevices::new(MockTach::new(), MockLcd::new(), MockTilt::new());
        let monitor = start(&mut devices, &Config::default()).unwrap();
        drop(monitor);

        assert_eq!(devices.opened, vec![Device::Tach, Device::Lcd, Device::Tilt]);
    }

    #[test]
    fn configure_failure_stops_before_tilt() {
        let log = release_log();
        let mut devices = MockDevices::new(
            MockTach::new().tracked(&log),
            MockLcd::new().fail_on(LcdCommand::Clear).tracked(&log),
            MockTilt::new().tracked(&log),
        );
        let raw = AtomicBool::new(false);

        let status = run(
            &mut devices,
            &Config::default(),
            &mut MockDelay::new(),
            ShutdownFlag::new(&raw),
        );
        assert_eq!(status.code(), -5);
        assert_eq!(devices.opened, vec![Device::Tach, Device::Lcd]);
        assert_eq!(*log.borrow(), vec![Device::Lcd, Device::Tach]);
    }

    #[test]
    fn missing_tach_opens_nothing_else() {
        let mut devices = MockDevices::new(None, MockLcd::new(), MockTilt::new());
        let raw = AtomicBool::new(false);

        let status = run(
            &mut devices,
            &Config::default(),
            &mut MockDelay::new(),
            ShutdownFlag::new(&raw),
        );
        assert_eq!(status.code(), -1);
        assert_eq!(devices.opened, vec![Device::Tach]);
    }
}
