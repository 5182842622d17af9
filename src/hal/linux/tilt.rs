//! Tilt sensor on a Linux spidev bus.
//!
//! One `SPI_IOC_MESSAGE(1)` per reading, with the clock, word size and delay
//! set on the transfer itself.

use std::io;
use std::path::Path;

use log::info;
use spidev::{Spidev, SpidevTransfer};

use crate::config::SpiConfig;
use crate::traits::{TiltSensor, TILT_FRAME_LEN};

/// Tilt sensor handle. Closed on drop.
pub struct LinuxTilt {
    spi: Spidev,
    params: SpiConfig,
}

impl LinuxTilt {
    /// Opens the spidev node read-write.
    pub fn open(path: impl AsRef<Path>, params: SpiConfig) -> io::Result<Self> {
        let path = path.as_ref();
        let spi = Spidev::open(path)?;
        info!(
            "opened tilt {} ({} Hz, {} bits/word)",
            path.display(),
            params.speed_hz,
            params.bits_per_word
        );
        Ok(Self { spi, params })
    }
}

impl core::fmt::Debug for LinuxTilt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinuxTilt")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl TiltSensor for LinuxTilt {
    type Error = io::Error;

    fn transfer(
        &mut self,
        tx: &[u8; TILT_FRAME_LEN],
        rx: &mut [u8; TILT_FRAME_LEN],
    ) -> io::Result<()> {
        let mut transfer = SpidevTransfer::read_write(tx, rx);
        transfer.speed_hz = self.params.speed_hz;
        transfer.bits_per_word = self.params.bits_per_word;
        transfer.delay_usecs = self.params.delay_usecs;
        self.spi.transfer(&mut transfer)
    }
}
