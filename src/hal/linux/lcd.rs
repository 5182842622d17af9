//! Character LCD driven through ioctl requests.
//!
//! The driver exposes no read/write protocol; every operation is one ioctl
//! whose request number is an ASCII digit and whose argument points at an
//! [`LcdMessage`].

use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use log::info;
use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::{ioctl_write_ptr_bad, libc};

use crate::message::{LcdCommand, LcdMessage};
use crate::traits::LcdDisplay;

ioctl_write_ptr_bad!(lcd_clear, LcdCommand::Clear.code(), LcdMessage);
ioctl_write_ptr_bad!(lcd_print_line_1, LcdCommand::PrintLine1.code(), LcdMessage);
ioctl_write_ptr_bad!(lcd_print_line_2, LcdCommand::PrintLine2.code(), LcdMessage);
ioctl_write_ptr_bad!(lcd_cursor_off, LcdCommand::CursorOff.code(), LcdMessage);

/// LCD device handle. Closed on drop.
#[derive(Debug)]
pub struct LinuxLcd {
    file: File,
}

impl LinuxLcd {
    /// Opens the LCD write-only and non-blocking.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        // O_NDELAY
        let file = OpenOptions::new()
            .write(true)
            .custom_flags(OFlag::O_NONBLOCK.bits())
            .open(path)?;
        info!("opened LCD {}", path.display());
        Ok(Self { file })
    }
}

impl LcdDisplay for LinuxLcd {
    type Error = Errno;

    fn request(&mut self, cmd: LcdCommand, msg: &LcdMessage) -> Result<(), Errno> {
        let fd: libc::c_int = self.file.as_raw_fd();
        let data: *const LcdMessage = msg;
        // SAFETY: `fd` stays open for the borrow of `self`, and `data` points
        // at a live `#[repr(C)]` request the driver only reads.
        let result = unsafe {
            match cmd {
                LcdCommand::Clear => lcd_clear(fd, data),
                LcdCommand::PrintLine1 => lcd_print_line_1(fd, data),
                LcdCommand::PrintLine2 => lcd_print_line_2(fd, data),
                LcdCommand::CursorOff => lcd_cursor_off(fd, data),
            }
        };
        result.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_device_fails() {
        assert!(LinuxLcd::open("/nonexistent/klcd").is_err());
    }

    #[test]
    fn ioctl_on_plain_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("tach-lcd-klcd-{}", std::process::id()));
        std::fs::write(&path, b"").unwrap();

        let mut lcd = LinuxLcd::open(&path).unwrap();
        // Regular files do not implement the LCD requests
        assert!(lcd.clear().is_err());
        assert!(lcd
            .write_line(crate::message::DisplayLine::First, &LcdMessage::rpm(1.0))
            .is_err());

        std::fs::remove_file(&path).unwrap();
    }
}
