//! Tachometer pulse counter behind a read-only character device.
//!
//! The driver accumulates pulses over a fixed window and hands out one
//! native-endian `int` per read. Reads block until the window closes.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use log::{info, warn};

use crate::traits::{TachSensor, PULSE_COUNT_LEN};

/// Tach device reader.
///
/// Generic over the byte source so it can be tested on any [`Read`].
#[derive(Debug)]
pub struct LinuxTach<R: Read = File> {
    source: R,
}

impl LinuxTach<File> {
    /// Opens the tach device read-only.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        info!("opened tach {}", path.display());
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> LinuxTach<R> {
    /// Wraps an already-open byte source.
    pub fn from_reader(source: R) -> Self {
        Self { source }
    }
}

impl<R: Read> TachSensor for LinuxTach<R> {
    type Error = io::Error;

    /// Fills `buf` until it is full or the device reports EOF.
    ///
    /// An error after some bytes arrived ends the read with the partial
    /// count; an error before any byte is returned as-is.
    fn read_count(&mut self, buf: &mut [u8; PULSE_COUNT_LEN]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if filled == 0 => return Err(e),
                Err(e) => {
                    warn!("tach read stopped after {} bytes: {}", filled, e);
                    break;
                }
            }
        }
        Ok(filled)
    }
}
