//! Error taxonomy and process exit codes.
//!
//! Every error is fatal at the point it is detected: the loop stops, all
//! devices are released, and the process exits with the code for the step
//! that failed.
//!
//! | Step | Variant | Exit code |
//! |------|---------|-----------|
//! | open tach | [`Error::Open`] (`Device::Tach`) | -1 |
//! | read tach | [`Error::ShortRead`] | -2 |
//! | write line | [`Error::Write`] | -3 |
//! | open LCD | [`Error::Open`] (`Device::Lcd`) | -4 |
//! | clear / cursor off | [`Error::Configure`] | -5 |
//! | open tilt | [`Error::Open`] (`Device::Tilt`) | -6 |
//! | tilt transfer | [`Error::Transfer`] | -7 |

use alloc::string::String;
use core::fmt;

use crate::message::{DisplayLine, LcdCommand};

/// The three devices the monitor owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Device {
    /// Tachometer pulse counter.
    Tach,
    /// Character LCD.
    Lcd,
    /// SPI tilt sensor.
    Tilt,
}

impl Device {
    /// Returns the device name for diagnostics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Device::Tach => "tach",
            Device::Lcd => "LCD",
            Device::Tilt => "tilt",
        }
    }
}

/// Fatal failure of one monitor step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A device could not be opened.
    Open {
        /// Which device.
        device: Device,
        /// OS error detail.
        detail: String,
    },
    /// Initial display setup was rejected by the driver.
    Configure {
        /// The setup request that failed.
        command: LcdCommand,
        /// Driver error detail.
        detail: String,
    },
    /// The tach returned fewer bytes than one pulse count.
    ShortRead {
        /// Bytes expected.
        expected: usize,
        /// Bytes actually read.
        read: usize,
    },
    /// The tilt sensor transfer failed.
    Transfer {
        /// Driver error detail.
        detail: String,
    },
    /// Printing a line was rejected by the driver.
    Write {
        /// The line being written.
        line: DisplayLine,
        /// Driver error detail.
        detail: String,
    },
}

impl Error {
    /// Process exit code for this failure.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Open {
                device: Device::Tach,
                ..
            } => -1,
            Error::ShortRead { .. } => -2,
            Error::Write { .. } => -3,
            Error::Open {
                device: Device::Lcd,
                ..
            } => -4,
            Error::Configure { .. } => -5,
            Error::Open {
                device: Device::Tilt,
                ..
            } => -6,
            Error::Transfer { .. } => -7,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { device, detail } => {
                write!(f, "error opening the {} device: {}", device.as_str(), detail)
            }
            Self::Configure { command, detail } => {
                write!(f, "error on LCD {:?}: {}", command, detail)
            }
            Self::ShortRead { expected, read } => write!(
                f,
                "error reading from gpio tach - {} of {} bytes",
                read, expected
            ),
            Self::Transfer { detail } => write!(f, "error sending SPI message: {}", detail),
            Self::Write { line, detail } => write!(
                f,
                "error writing line {} to the LCD: {}",
                line.number(),
                detail
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// How the process ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Shutdown was requested and the loop drained cleanly.
    Shutdown,
    /// A step failed.
    Failed(Error),
}

impl ExitStatus {
    /// Process exit code: 0 on clean shutdown, the error's code otherwise.
    pub const fn code(&self) -> i32 {
        match self {
            ExitStatus::Shutdown => 0,
            ExitStatus::Failed(e) => e.exit_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn open(device: Device) -> Error {
        Error::Open {
            device,
            detail: "ENOENT".into(),
        }
    }

    #[test]
    fn exit_codes_are_distinct_and_negative() {
        let errors = [
            open(Device::Tach),
            Error::ShortRead {
                expected: 4,
                read: 0,
            },
            Error::Write {
                line: DisplayLine::First,
                detail: String::new(),
            },
            open(Device::Lcd),
            Error::Configure {
                command: LcdCommand::Clear,
                detail: String::new(),
            },
            open(Device::Tilt),
            Error::Transfer {
                detail: String::new(),
            },
        ];

        let codes: Vec<i32> = errors.iter().map(Error::exit_code).collect();
        assert_eq!(codes, vec![-1, -2, -3, -4, -5, -6, -7]);
    }

    #[test]
    fn shutdown_exits_zero() {
        assert_eq!(ExitStatus::Shutdown.code(), 0);
        assert_eq!(ExitStatus::Failed(open(Device::Lcd)).code(), -4);
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            open(Device::Tach).to_string(),
            "error opening the tach device: ENOENT"
        );
        assert_eq!(
            Error::ShortRead {
                expected: 4,
                read: 2
            }
            .to_string(),
            "error reading from gpio tach - 2 of 4 bytes"
        );
        assert_eq!(
            Error::Write {
                line: DisplayLine::Second,
                detail: "EIO".into()
            }
            .to_string(),
            "error writing line 2 to the LCD: EIO"
        );
        assert_eq!(
            Error::Configure {
                command: LcdCommand::CursorOff,
                detail: "EINVAL".into()
            }
            .to_string(),
            "error on LCD CursorOff: EINVAL"
        );
    }
}
