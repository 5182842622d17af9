//! LCD driver request payload and bounded text formatting.
//!
//! The character LCD driver takes one fixed-layout request per ioctl:
//!
//! ```text
//! struct ioctl_message {
//!     char kbuf[50];          // null-padded text
//!     unsigned int lineNumber;   // 1 or 2
//!     unsigned int nthCharacter; // start column
//! };
//! ```
//!
//! [`LcdMessage`] mirrors that layout exactly. Text is always formatted into
//! the buffer through a truncating writer, so the last byte stays a NUL
//! terminator no matter how large the formatted value is.
//!
//! # Example
//!
//! ```rust
//! use tach_lcd::message::{DisplayLine, LcdMessage, MAX_BUF_LEN};
//!
//! let msg = LcdMessage::tilt(-12);
//! assert_eq!(msg.text(), "T: -12");
//! assert_eq!(msg.line(), Some(DisplayLine::Second));
//!
//! let huge = LcdMessage::rpm(f32::MAX);
//! assert!(huge.text().len() < MAX_BUF_LEN);
//! ```

use core::ffi::c_uint;
use core::fmt::{self, Write};

/// Size of the driver's text buffer, terminator included.
///
/// Fixed by the LCD driver; changing it breaks the ioctl layout.
pub const MAX_BUF_LEN: usize = 50;

/// Which LCD line a message targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayLine {
    /// Top line (RPM readout).
    First,
    /// Bottom line (tilt readout).
    Second,
}

impl DisplayLine {
    /// Line number as the driver counts them (1 or 2).
    #[inline]
    pub const fn number(self) -> c_uint {
        match self {
            DisplayLine::First => 1,
            DisplayLine::Second => 2,
        }
    }

    /// The print command that targets this line.
    #[inline]
    pub const fn command(self) -> LcdCommand {
        match self {
            DisplayLine::First => LcdCommand::PrintLine1,
            DisplayLine::Second => LcdCommand::PrintLine2,
        }
    }
}

/// ioctl request codes understood by the LCD driver.
///
/// The driver uses bare ASCII digits as request numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LcdCommand {
    /// Blank both lines.
    Clear,
    /// Print the payload text on line 1.
    PrintLine1,
    /// Print the payload text on line 2.
    PrintLine2,
    /// Hide the cursor.
    CursorOff,
}

impl LcdCommand {
    /// Raw request number passed to `ioctl`.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            LcdCommand::Clear => b'0',
            LcdCommand::PrintLine1 => b'1',
            LcdCommand::PrintLine2 => b'2',
            LcdCommand::CursorOff => b'5',
        }
    }
}

/// One LCD driver request, laid out as the driver expects.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcdMessage {
    /// Null-padded text.
    pub kbuf: [u8; MAX_BUF_LEN],
    /// Target line, 1 or 2 (0 for commands that take no text).
    pub line_number: c_uint,
    /// Start column.
    pub nth_character: c_uint,
}

impl LcdMessage {
    /// All-zero request, used for commands that carry no text.
    pub const fn empty() -> Self {
        Self {
            kbuf: [0; MAX_BUF_LEN],
            line_number: 0,
            nth_character: 0,
        }
    }

    /// Formats `args` into a request for `line`, starting at column 0.
    ///
    /// Output longer than `MAX_BUF_LEN - 1` bytes is cut at the last whole
    /// character that fits.
    pub fn format(line: DisplayLine, args: fmt::Arguments<'_>) -> Self {
        let mut msg = Self::empty();
        msg.line_number = line.number();
        let mut writer = Truncating::new(&mut msg.kbuf[..MAX_BUF_LEN - 1]);
        // Truncating never fails; only a Display impl could.
        let _ = writer.write_fmt(args);
        msg
    }

    /// Line 1 text: RPM with one decimal place.
    ///
    /// The trailing spaces wipe leftovers from a longer previous reading.
    pub fn rpm(rpm: f32) -> Self {
        Self::format(DisplayLine::First, format_args!("RPMS: {:3.1}    ", rpm))
    }

    /// Line 2 text: tilt relative to the zero reference.
    pub fn tilt(tilt: i32) -> Self {
        Self::format(DisplayLine::Second, format_args!("T: {}", tilt))
    }

    /// Text up to the first NUL.
    pub fn text(&self) -> &str {
        let end = self
            .kbuf
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(MAX_BUF_LEN);
        core::str::from_utf8(&self.kbuf[..end]).unwrap_or("")
    }

    /// Target line, if the request carries one.
    pub fn line(&self) -> Option<DisplayLine> {
        match self.line_number {
            1 => Some(DisplayLine::First),
            2 => Some(DisplayLine::Second),
            _ => None,
        }
    }
}

/// `fmt::Write` sink that silently drops whatever does not fit.
struct Truncating<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> Truncating<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }
}

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buf.len() - self.len;
        let take = if s.len() <= room {
            s.len()
        } else {
            // Back off to a char boundary
            (0..=room).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
        };
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}
