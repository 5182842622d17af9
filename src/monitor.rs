//! The sampling loop that ties the sensors to the display.
//!
//! This module provides [`Monitor`], which owns the three devices and runs
//! the read → transform → write cycle.
//!
//! # Overview
//!
//! Each cycle:
//! - reads one pulse count from the tach and prints RPM on line 1
//! - reads one frame from the tilt sensor and prints the tilt on line 2
//! - pauses for the sampling interval
//!
//! Any failure stops the loop immediately. The shutdown flag is checked once
//! per cycle, after the pause.
//!
//! A monitor only accepts a display that went through [`configure_display`],
//! so the loop can never print to an LCD that was not cleared first.
//!
//! # Example
//!
//! ```rust
//! use core::sync::atomic::AtomicBool;
//! use tach_lcd::{configure_display, Config, ExitStatus, Monitor, ShutdownFlag};
//! use tach_lcd::hal::{MockDelay, MockLcd, MockTach, MockTilt};
//!
//! let mut tach = MockTach::new();
//! tach.queue_pulses(18);
//! let mut tilt = MockTilt::new();
//! tilt.queue_frame([0x2B, 0xC0]); // angle 2800
//!
//! let lcd = configure_display(MockLcd::new()).unwrap();
//! let mut monitor = Monitor::new(tach, lcd, tilt, &Config::default());
//!
//! let raw = AtomicBool::new(false);
//! let flag = ShutdownFlag::new(&raw);
//! let mut delay = MockDelay::new().with_shutdown_after(1, flag);
//!
//! assert_eq!(monitor.run(&mut delay, flag), ExitStatus::Shutdown);
//!
//! let (_, lcd, _) = monitor.into_parts();
//! assert_eq!(lcd.line_text(1), Some("RPMS: 77.8    "));
//! assert_eq!(lcd.line_text(2), Some("T: 0"));
//! ```

use alloc::format;

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{Error, ExitStatus};
use crate::message::{DisplayLine, LcdCommand, LcdMessage};
use crate::shutdown::ShutdownFlag;
use crate::traits::{LcdDisplay, TachSensor, TiltSensor, PULSE_COUNT_LEN, TILT_FRAME_LEN};
use crate::transform::{alarm_bits, decode_angle, rpm_from_pulses, tilt_from_angle};

/// A display that has been cleared and has its cursor off.
#[derive(Debug)]
pub struct Configured<L>(L);

impl<L> Configured<L> {
    /// Gives the display back.
    pub fn into_inner(self) -> L {
        self.0
    }
}

/// Clears the display, then turns the cursor off.
///
/// Either request failing is an [`Error::Configure`]; the cursor request is
/// not sent if clearing fails. On failure the display is dropped (closed).
pub fn configure_display<L: LcdDisplay>(mut lcd: L) -> Result<Configured<L>, Error> {
    lcd.clear()
        .map_err(|e| configure_error(LcdCommand::Clear, e))?;
    lcd.disable_cursor()
        .map_err(|e| configure_error(LcdCommand::CursorOff, e))?;
    Ok(Configured(lcd))
}

fn configure_error<E: core::fmt::Debug>(command: LcdCommand, e: E) -> Error {
    Error::Configure {
        command,
        detail: format!("{:?}", e),
    }
}

/// Everything read and derived in one cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleReport {
    /// Raw pulse count from the tach.
    pub pulses: i32,
    /// Revolutions per minute.
    pub rpm: f32,
    /// Raw bytes received from the tilt sensor.
    pub frame: [u8; TILT_FRAME_LEN],
    /// Decoded 14-bit angle.
    pub angle: u16,
    /// Tilt relative to the zero reference.
    pub tilt: i32,
}

/// Sampling loop over a tach, an LCD and a tilt sensor.
///
/// # Type Parameters
///
/// - `T`: tachometer ([`TachSensor`])
/// - `L`: display ([`LcdDisplay`])
/// - `S`: tilt sensor ([`TiltSensor`])
///
/// The monitor owns the devices exclusively; dropping it releases them.
pub struct Monitor<T: TachSensor, L: LcdDisplay, S: TiltSensor> {
    tach: T,
    lcd: L,
    tilt: S,
    interval_ms: u32,
}

impl<T: TachSensor, L: LcdDisplay, S: TiltSensor> Monitor<T, L, S> {
    /// Create a monitor over opened devices and a configured display.
    ///
    /// A display that skipped [`configure_display`] is rejected:
    ///
    /// ```compile_fail
    /// use tach_lcd::{Config, Monitor};
    /// use tach_lcd::hal::{MockLcd, MockTach, MockTilt};
    ///
    /// let m = Monitor::new(MockTach::new(), MockLcd::new(), MockTilt::new(), &Config::default());
    /// ```
    pub fn new(tach: T, lcd: Configured<L>, tilt: S, config: &Config) -> Self {
        Self {
            tach,
            lcd: lcd.into_inner(),
            tilt,
            interval_ms: config.interval_ms,
        }
    }

    /// Reads one pulse count.
    ///
    /// Anything short of a full count, including EOF and driver errors, is a
    /// [`Error::ShortRead`].
    fn read_pulses(&mut self) -> Result<i32, Error> {
        let mut buf = [0u8; PULSE_COUNT_LEN];
        let read = match self.tach.read_count(&mut buf) {
            Ok(n) => n,
            Err(e) => {
                warn!("tach read failed: {:?}", e);
                0
            }
        };
        if read != PULSE_COUNT_LEN {
            return Err(Error::ShortRead {
                expected: PULSE_COUNT_LEN,
                read,
            });
        }
        Ok(i32::from_ne_bytes(buf))
    }

    fn write_line(&mut self, line: DisplayLine, msg: &LcdMessage) -> Result<(), Error> {
        self.lcd.write_line(line, msg).map_err(|e| Error::Write {
            line,
            detail: format!("{:?}", e),
        })
    }

    /// Runs one read/transform/write cycle without pausing.
    pub fn step(&mut self) -> Result<CycleReport, Error> {
        let pulses = self.read_pulses()?;
        let rpm = rpm_from_pulses(pulses);
        self.write_line(DisplayLine::First, &LcdMessage::rpm(rpm))?;

        let frame = self.tilt.read_frame().map_err(|e| Error::Transfer {
            detail: format!("{:?}", e),
        })?;
        let alarms = alarm_bits(frame);
        if alarms != 0 {
            debug!("tilt alarm bits set: {:#04b}", alarms);
        }
        let angle = decode_angle(frame);
        let tilt = tilt_from_angle(angle);
        self.write_line(DisplayLine::Second, &LcdMessage::tilt(tilt))?;

        debug!(
            "pulses={} rpm={:.1} frame={:02x?} angle={} tilt={}",
            pulses, rpm, frame, angle, tilt
        );

        Ok(CycleReport {
            pulses,
            rpm,
            frame,
            angle,
            tilt,
        })
    }

    /// Samples until shutdown is requested or a step fails.
    ///
    /// At least one cycle always runs. The pause is not cut short by a
    /// shutdown request; the flag is seen at the next cycle boundary.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D, shutdown: ShutdownFlag<'_>) -> ExitStatus {
        info!("sampling every {} ms", self.interval_ms);

        loop {
            if let Err(e) = self.step() {
                error!("{}", e);
                return ExitStatus::Failed(e);
            }

            delay.delay_ms(self.interval_ms);

            if shutdown.is_requested() {
                info!("shutdown requested, stopping");
                return ExitStatus::Shutdown;
            }
        }
    }

    /// Gives the devices back, for inspection in tests.
    pub fn into_parts(self) -> (T, L, S) {
        (self.tach, self.lcd, self.tilt)
    }
}
