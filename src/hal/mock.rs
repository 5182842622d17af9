//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every device trait, enabling
//! development and testing on desktop without the board.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockTach`] | [`TachSensor`] | Queued pulse counts, short reads and errors |
//! | [`MockTilt`] | [`TiltSensor`] | Queued receive frames and errors |
//! | [`MockLcd`] | [`LcdDisplay`] | Records requests, injects driver failures |
//! | [`MockDelay`] | [`DelayNs`] | Records pauses, can request shutdown |
//! | [`MockDevices`] | [`DeviceProvider`] | Hands out the mocks above, or fails to |
//!
//! Every device mock can share a [`ReleaseLog`] that records when it is
//! dropped, which is how tests check that each device is released exactly
//! once.
//!
//! # Example
//!
//! ```rust
//! use tach_lcd::hal::{release_log, MockLcd, MockTach};
//! use tach_lcd::Device;
//!
//! let log = release_log();
//! let tach = MockTach::new().tracked(&log);
//! let lcd = MockLcd::new().tracked(&log);
//!
//! drop(lcd);
//! drop(tach);
//! assert_eq!(*log.borrow(), vec![Device::Lcd, Device::Tach]);
//! ```
//!
//! [`TachSensor`]: crate::traits::TachSensor
//! [`TiltSensor`]: crate::traits::TiltSensor
//! [`LcdDisplay`]: crate::traits::LcdDisplay
//! [`DeviceProvider`]: crate::app::DeviceProvider

extern crate alloc;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use embedded_hal::delay::DelayNs;

use crate::app::DeviceProvider;
use crate::config::Config;
use crate::error::{Device, Error};
use crate::message::{LcdCommand, LcdMessage};
use crate::shutdown::ShutdownFlag;
use crate::traits::{LcdDisplay, TachSensor, TiltSensor, PULSE_COUNT_LEN, TILT_FRAME_LEN};

/// Shared record of device releases, in drop order.
pub type ReleaseLog = Rc<RefCell<Vec<Device>>>;

/// Creates an empty [`ReleaseLog`].
pub fn release_log() -> ReleaseLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Pushes its device onto a [`ReleaseLog`] when dropped.
#[derive(Debug, Default)]
struct Release(Option<(ReleaseLog, Device)>);

impl Drop for Release {
    fn drop(&mut self) {
        if let Some((log, device)) = &self.0 {
            log.borrow_mut().push(*device);
        }
    }
}

/// Error returned by the device mocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockError(pub &'static str);

// ============================================================================
// Sensor Mocks
// ============================================================================

#[derive(Debug)]
enum TachRead {
    Bytes(Vec<u8>),
    Fail,
}

/// Mock tachometer.
///
/// Reads come out in the order they were queued. An empty queue behaves like
/// EOF (zero bytes).
///
/// # Example
///
/// ```rust
/// use tach_lcd::hal::MockTach;
/// use tach_lcd::traits::TachSensor;
///
/// let mut tach = MockTach::new();
/// tach.queue_pulses(42);
/// tach.queue_bytes(&[1, 2]);
///
/// let mut buf = [0u8; 4];
/// assert_eq!(tach.read_count(&mut buf).unwrap(), 4);
/// assert_eq!(i32::from_ne_bytes(buf), 42);
/// assert_eq!(tach.read_count(&mut buf).unwrap(), 2);
/// assert_eq!(tach.read_count(&mut buf).unwrap(), 0); // EOF
/// ```
#[derive(Debug, Default)]
pub struct MockTach {
    reads: VecDeque<TachRead>,
    /// Number of reads performed.
    pub read_count: usize,
    released: Release,
}

impl MockTach {
    /// Creates a mock tach with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records this device in `log` when dropped.
    pub fn tracked(mut self, log: &ReleaseLog) -> Self {
        self.released = Release(Some((log.clone(), Device::Tach)));
        self
    }

    /// Queue one full pulse count.
    pub fn queue_pulses(&mut self, pulses: i32) {
        self.reads
            .push_back(TachRead::Bytes(pulses.to_ne_bytes().to_vec()));
    }

    /// Queue a raw read (at most 4 bytes are delivered).
    pub fn queue_bytes(&mut self, bytes: &[u8]) {
        self.reads.push_back(TachRead::Bytes(bytes.to_vec()));
    }

    /// Queue a driver error.
    pub fn queue_error(&mut self) {
        self.reads.push_back(TachRead::Fail);
    }
}

impl TachSensor for MockTach {
    type Error = MockError;

    fn read_count(&mut self, buf: &mut [u8; PULSE_COUNT_LEN]) -> Result<usize, MockError> {
        self.read_count += 1;
        match self.reads.pop_front() {
            None => Ok(0),
            Some(TachRead::Fail) => Err(MockError("tach driver error")),
            Some(TachRead::Bytes(bytes)) => {
                let n = bytes.len().min(PULSE_COUNT_LEN);
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
        }
    }
}


/// Mock tilt sensor.
///
/// Returns queued frames in order; once the queue is empty every transfer
/// succeeds with `[0x00, 0x00]`. Transmitted frames are recorded in
/// [`sent`](Self::sent).
///
/// # Example
///
/// ```rust
/// use tach_lcd::hal::MockTilt;
/// use tach_lcd::traits::TiltSensor;
///
/// let mut tilt = MockTilt::new();
/// tilt.queue_frame([0x12, 0x34]);
///
/// assert_eq!(tilt.read_frame().unwrap(), [0x12, 0x34]);
/// assert_eq!(tilt.read_frame().unwrap(), [0x00, 0x00]);
/// assert_eq!(tilt.sent.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockTilt {
    frames: VecDeque<Option<[u8; TILT_FRAME_LEN]>>,
    /// Every transmit frame, in order.
    pub sent: Vec<[u8; TILT_FRAME_LEN]>,
    released: Release,
}

impl MockTilt {
    /// Creates a mock tilt sensor with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records this device in `log` when dropped.
    pub fn tracked(mut self, log: &ReleaseLog) -> Self {
        self.released = Release(Some((log.clone(), Device::Tilt)));
        self
    }

    /// Queue a frame to be received.
    pub fn queue_frame(&mut self, rx: [u8; TILT_FRAME_LEN]) {
        self.frames.push_back(Some(rx));
    }

    /// Queue a failed transfer.
    pub fn queue_error(&mut self) {
        self.frames.push_back(None);
    }
}

impl TiltSensor for MockTilt {
    type Error = MockError;

    fn transfer(
        &mut self,
        tx: &[u8; TILT_FRAME_LEN],
        rx: &mut [u8; TILT_FRAME_LEN],
    ) -> Result<(), MockError> {
        self.sent.push(*tx);
        match self.frames.pop_front() {
            Some(Some(frame)) => {
                *rx = frame;
                Ok(())
            }
            Some(None) => Err(MockError("spi transfer failed")),
            None => {
                *rx = [0; TILT_FRAME_LEN];
                Ok(())
            }
        }
    }
}


// ============================================================================
// Display Mocks
// ============================================================================

/// Mock LCD.
///
/// Records every request, failed ones included. A failure can be injected
/// for one command, optionally after that command has succeeded a number of
/// times.
///
/// # Example
///
/// ```rust
/// use tach_lcd::hal::MockLcd;
/// use tach_lcd::message::{DisplayLine, LcdCommand, LcdMessage};
/// use tach_lcd::traits::LcdDisplay;
///
/// let mut lcd = MockLcd::new().fail_on_after(LcdCommand::PrintLine2, 1);
///
/// lcd.write_line(DisplayLine::Second, &LcdMessage::tilt(1)).unwrap();
/// assert!(lcd.write_line(DisplayLine::Second, &LcdMessage::tilt(2)).is_err());
///
/// assert_eq!(lcd.line_text(2), Some("T: 2"));
/// assert_eq!(lcd.requests.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockLcd {
    /// Every request issued, in order.
    pub requests: Vec<(LcdCommand, LcdMessage)>,
    fail_command: Option<LcdCommand>,
    fail_skip: usize,
    released: Release,
}

impl MockLcd {
    /// Creates a mock LCD that accepts every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records this device in `log` when dropped.
    pub fn tracked(mut self, log: &ReleaseLog) -> Self {
        self.released = Release(Some((log.clone(), Device::Lcd)));
        self
    }

    /// Reject every `cmd` request.
    pub fn fail_on(self, cmd: LcdCommand) -> Self {
        self.fail_on_after(cmd, 0)
    }

    /// Accept `cmd` `skip` times, then reject it.
    pub fn fail_on_after(mut self, cmd: LcdCommand, skip: usize) -> Self {
        self.fail_command = Some(cmd);
        self.fail_skip = skip;
        self
    }

    /// Commands issued so far, in order.
    pub fn commands(&self) -> Vec<LcdCommand> {
        self.requests.iter().map(|(cmd, _)| *cmd).collect()
    }

    /// Text of the most recent request sent to line `number` (1 or 2).
    pub fn line_text(&self, number: u32) -> Option<&str> {
        self.requests
            .iter()
            .rev()
            .find(|(cmd, msg)| {
                matches!(cmd, LcdCommand::PrintLine1 | LcdCommand::PrintLine2)
                    && msg.line_number == number
            })
            .map(|(_, msg)| msg.text())
    }
}

impl LcdDisplay for MockLcd {
    type Error = MockError;

    fn request(&mut self, cmd: LcdCommand, msg: &LcdMessage) -> Result<(), MockError> {
        self.requests.push((cmd, *msg));
        if self.fail_command == Some(cmd) {
            if self.fail_skip == 0 {
                return Err(MockError("lcd driver rejected request"));
            }
            self.fail_skip -= 1;
        }
        Ok(())
    }
}


// ============================================================================
// Timing Mocks
// ============================================================================

/// Mock delay for testing the sampling loop.
///
/// Returns immediately and records every pause in milliseconds. It can also
/// stand in for a signal that arrives during a pause.
///
/// # Example
///
/// ```rust
/// use core::sync::atomic::AtomicBool;
/// use embedded_hal::delay::DelayNs;
/// use tach_lcd::hal::MockDelay;
/// use tach_lcd::ShutdownFlag;
///
/// let raw = AtomicBool::new(false);
/// let flag = ShutdownFlag::new(&raw);
/// let mut delay = MockDelay::new().with_shutdown_after(2, flag);
///
/// delay.delay_ms(1000);
/// assert!(!flag.is_requested());
/// delay.delay_ms(1000);
/// assert!(flag.is_requested());
/// assert_eq!(delay.pauses_ms, vec![1000, 1000]);
/// ```
#[derive(Debug, Default)]
pub struct MockDelay<'a> {
    /// Every pause requested, in milliseconds.
    pub pauses_ms: Vec<u32>,
    shutdown_after: Option<(usize, ShutdownFlag<'a>)>,
}

impl<'a> MockDelay<'a> {
    /// Creates a mock delay that never requests shutdown.
    pub fn new() -> Self {
        Self {
            pauses_ms: Vec::new(),
            shutdown_after: None,
        }
    }

    /// Requests shutdown on `flag` during the `pauses`-th pause.
    pub fn with_shutdown_after(mut self, pauses: usize, flag: ShutdownFlag<'a>) -> Self {
        self.shutdown_after = Some((pauses, flag));
        self
    }

    fn record(&mut self, ms: u32) {
        self.pauses_ms.push(ms);
        if let Some((after, flag)) = &self.shutdown_after {
            if self.pauses_ms.len() >= *after {
                flag.request();
            }
        }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.record(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(ms);
    }
}

// ============================================================================
// Device Provider Mock
// ============================================================================

/// Mock device provider.
///
/// Each `open_*` call takes the corresponding mock; a device left as `None`
/// fails to open. [`opened`](Self::opened) records every open attempt.
///
/// # Example
///
/// ```rust
/// use tach_lcd::hal::{MockDevices, MockLcd, MockTach};
/// use tach_lcd::app::DeviceProvider;
/// use tach_lcd::{Config, Device};
///
/// let mut devices = MockDevices::new(MockTach::new(), MockLcd::new(), None);
/// let config = Config::default();
///
/// assert!(devices.open_tach(&config).is_ok());
/// assert!(devices.open_tilt(&config).is_err());
/// assert_eq!(devices.opened, vec![Device::Tach, Device::Tilt]);
/// ```
#[derive(Debug, Default)]
pub struct MockDevices {
    /// Tach handed out by `open_tach`.
    pub tach: Option<MockTach>,
    /// LCD handed out by `open_lcd`.
    pub lcd: Option<MockLcd>,
    /// Tilt sensor handed out by `open_tilt`.
    pub tilt: Option<MockTilt>,
    /// Open attempts, in order.
    pub opened: Vec<Device>,
}

impl MockDevices {
    /// Creates a provider; `None` entries fail to open.
    pub fn new(
        tach: impl Into<Option<MockTach>>,
        lcd: impl Into<Option<MockLcd>>,
        tilt: impl Into<Option<MockTilt>>,
    ) -> Self {
        Self {
            tach: tach.into(),
            lcd: lcd.into(),
            tilt: tilt.into(),
            opened: Vec::new(),
        }
    }
}

fn missing(device: Device) -> Error {
    Error::Open {
        device,
        detail: String::from("No such file or directory"),
    }
}

impl DeviceProvider for MockDevices {
    type Tach = MockTach;
    type Lcd = MockLcd;
    type Tilt = MockTilt;

    fn open_tach(&mut self, _config: &Config) -> Result<MockTach, Error> {
        self.opened.push(Device::Tach);
        self.tach.take().ok_or_else(|| missing(Device::Tach))
    }

    fn open_lcd(&mut self, _config: &Config) -> Result<MockLcd, Error> {
        self.opened.push(Device::Lcd);
        self.lcd.take().ok_or_else(|| missing(Device::Lcd))
    }

    fn open_tilt(&mut self, _config: &Config) -> Result<MockTilt, Error> {
        self.opened.push(Device::Tilt);
        self.tilt.take().ok_or_else(|| missing(Device::Tilt))
    }
}

// ============================================================================
// Tests
// ============================================================================
