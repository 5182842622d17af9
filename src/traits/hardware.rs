//! Sensor abstraction traits for the tachometer and the tilt sensor.
//!
//! Implementations do the raw device I/O only. Checking byte counts,
//! decoding and unit conversion live in [`crate::Monitor`] and
//! [`crate::transform`] so they can be tested against the mocks.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`TachSensor`] | Pulse counter behind a read-only char device |
//! | [`TiltSensor`] | Angle sensor behind a duplex SPI device |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For the real board, use the implementations
//! from `hal::linux` (requires `linux` feature).
//!
//! # Example
//!
//! ```rust
//! use tach_lcd::hal::MockTach;
//! use tach_lcd::traits::{TachSensor, PULSE_COUNT_LEN};
//!
//! let mut tach = MockTach::new();
//! tach.queue_pulses(18);
//!
//! let mut buf = [0u8; PULSE_COUNT_LEN];
//! assert_eq!(tach.read_count(&mut buf).unwrap(), 4);
//! assert_eq!(i32::from_ne_bytes(buf), 18);
//! ```

/// Bytes in one pulse count (a native C `int`).
pub const PULSE_COUNT_LEN: usize = core::mem::size_of::<i32>();

/// Bytes in one tilt sensor transfer.
pub const TILT_FRAME_LEN: usize = 2;

/// Transmit frame for a tilt reading.
pub const TILT_TX: [u8; TILT_FRAME_LEN] = [0xFF, 0x00];

/// Tachometer pulse counter.
///
/// Each read yields the pulses counted over the driver's fixed window
/// (3 seconds on the reference rig). Blocking is up to the driver.
///
/// # Implementation Notes
///
/// - Fill as much of `buf` as the device provides, stopping only at EOF
///   (stdio `fread` semantics); do not retry after EOF
/// - Return the number of bytes filled; the caller treats anything short of
///   [`PULSE_COUNT_LEN`] as fatal
/// - The count is native-endian
pub trait TachSensor {
    /// Error type for tach reads.
    type Error: core::fmt::Debug;

    /// Reads one raw pulse count into `buf`, returning the bytes filled.
    fn read_count(&mut self, buf: &mut [u8; PULSE_COUNT_LEN]) -> Result<usize, Self::Error>;
}

/// Tilt sensor on a duplex SPI bus.
///
/// One synchronous transfer clocks out `tx` and clocks in the same number of
/// bytes. Bus speed, word size and inter-byte delay are fixed by the
/// implementation (500 kHz, 8 bits, 1 µs on the reference rig).
pub trait TiltSensor {
    /// Error type for transfers.
    type Error: core::fmt::Debug;

    /// Performs one full-length transfer.
    fn transfer(
        &mut self,
        tx: &[u8; TILT_FRAME_LEN],
        rx: &mut [u8; TILT_FRAME_LEN],
    ) -> Result<(), Self::Error>;

    /// Transfers [`TILT_TX`] and returns the raw received frame.
    fn read_frame(&mut self) -> Result<[u8; TILT_FRAME_LEN], Self::Error> {
        let mut rx = [0u8; TILT_FRAME_LEN];
        self.transfer(&TILT_TX, &mut rx)?;
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTilt {
        last_tx: Option<[u8; TILT_FRAME_LEN]>,
    }

    impl TiltSensor for EchoTilt {
        type Error = ();

        fn transfer(
            &mut self,
            tx: &[u8; TILT_FRAME_LEN],
            rx: &mut [u8; TILT_FRAME_LEN],
        ) -> Result<(), ()> {
            self.last_tx = Some(*tx);
            rx[0] = tx[1];
            rx[1] = tx[0];
            Ok(())
        }
    }

    #[test]
    fn pulse_count_is_c_int_sized() {
        assert_eq!(PULSE_COUNT_LEN, 4);
    }

    #[test]
    fn read_frame_sends_fixed_tx() {
        let mut tilt = EchoTilt { last_tx: None };
        let rx = tilt.read_frame().unwrap();
        assert_eq!(tilt.last_tx, Some([0xFF, 0x00]));
        assert_eq!(rx, [0x00, 0xFF]);
    }
}
