//! Display abstraction for the two-line character LCD.
//!
//! This module defines the [`LcdDisplay`] trait: one raw driver request per
//! call, with convenience methods for the requests the monitor issues.

use crate::message::{DisplayLine, LcdCommand, LcdMessage};

/// Character LCD driven by control requests.
///
/// Implementors forward a command and its payload to the driver. Any
/// driver-level failure is returned as-is; the caller decides it is fatal.
///
/// # Example
///
/// ```ignore
/// use tach_lcd::traits::LcdDisplay;
/// use tach_lcd::message::{LcdCommand, LcdMessage};
///
/// struct MyLcd { /* ... */ }
///
/// impl LcdDisplay for MyLcd {
///     type Error = ();
///
///     fn request(&mut self, cmd: LcdCommand, msg: &LcdMessage) -> Result<(), ()> {
///         // ioctl(fd, cmd.code(), msg)
///         Ok(())
///     }
/// }
/// ```
pub trait LcdDisplay {
    /// Error type for display requests.
    type Error: core::fmt::Debug;

    /// Issues one control request to the driver.
    fn request(&mut self, cmd: LcdCommand, msg: &LcdMessage) -> Result<(), Self::Error>;

    /// Blanks the display.
    fn clear(&mut self) -> Result<(), Self::Error> {
        self.request(LcdCommand::Clear, &LcdMessage::empty())
    }

    /// Hides the cursor.
    fn disable_cursor(&mut self) -> Result<(), Self::Error> {
        self.request(LcdCommand::CursorOff, &LcdMessage::empty())
    }

    /// Prints a formatted message on `line`.
    fn write_line(&mut self, line: DisplayLine, msg: &LcdMessage) -> Result<(), Self::Error> {
        self.request(line.command(), msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        requests: Vec<(LcdCommand, LcdMessage)>,
    }

    impl LcdDisplay for Recorder {
        type Error = ();

        fn request(&mut self, cmd: LcdCommand, msg: &LcdMessage) -> Result<(), ()> {
            self.requests.push((cmd, *msg));
            Ok(())
        }
    }

    #[test]
    fn clear_sends_empty_payload() {
        let mut lcd = Recorder::default();
        lcd.clear().unwrap();
        assert_eq!(lcd.requests, vec![(LcdCommand::Clear, LcdMessage::empty())]);
    }

    #[test]
    fn disable_cursor_sends_cursor_off() {
        let mut lcd = Recorder::default();
        lcd.disable_cursor().unwrap();
        assert_eq!(lcd.requests[0].0, LcdCommand::CursorOff);
    }

    #[test]
    fn write_line_picks_command_for_line() {
        let mut lcd = Recorder::default();
        lcd.write_line(DisplayLine::First, &LcdMessage::rpm(1.0))
            .unwrap();
        lcd.write_line(DisplayLine::Second, &LcdMessage::tilt(1))
            .unwrap();

        assert_eq!(lcd.requests[0].0, LcdCommand::PrintLine1);
        assert_eq!(lcd.requests[1].0, LcdCommand::PrintLine2);
        assert_eq!(lcd.requests[1].1.text(), "T: 1");
    }
}
