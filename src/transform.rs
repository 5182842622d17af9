//! Pure conversions from raw sensor units to physical units.
//!
//! Nothing here touches hardware. The calibration constants tie the raw
//! readings to one specific rig:
//!
//! | Constant | Value | Meaning |
//! |----------|-------|---------|
//! | [`WINDOW_SECS`] | 3 | Seconds the tach driver accumulates pulses for |
//! | [`SPOKES_PER_REVOLUTION`] | 18.5 | Spokes seen by the wheel sensor per turn |
//! | [`ANGLE_OFFSET`] | 2800 | Raw angle reading at zero tilt |
//!
//! # Example
//!
//! ```rust
//! use tach_lcd::transform::{decode_angle, rpm_from_pulses, tilt_from_angle};
//!
//! assert_eq!(rpm_from_pulses(0), 0.0);
//! assert_eq!(decode_angle([0xFF, 0xFF]), 4095);
//! assert_eq!(tilt_from_angle(2800), 0);
//! ```

/// Seconds over which the tach driver accumulates one pulse count.
pub const WINDOW_SECS: f32 = 3.0;

/// Spokes per wheel revolution seen by the tach sensor.
pub const SPOKES_PER_REVOLUTION: f32 = 18.5;

/// Raw angle reading that corresponds to zero tilt.
pub const ANGLE_OFFSET: i32 = 2800;

/// Largest value [`decode_angle`] can return (14 bits).
pub const ANGLE_MAX: u16 = 0x3FFF;

/// Alarm bits in the first received byte.
const ALARM_MASK: u8 = 0xC0;

/// Converts a pulse count to revolutions per minute.
///
/// `pulses / window / (spokes / 4) * 60`, evaluated in `f32` in that order.
/// No rounding happens here; the display formats to one decimal place.
pub fn rpm_from_pulses(pulses: i32) -> f32 {
    pulses as f32 / WINDOW_SECS / (SPOKES_PER_REVOLUTION / 4.0) * 60.0
}

/// Decodes the raw angle from the two bytes clocked out of the tilt sensor.
///
/// The top two bits of the first byte are alarm flags and the bottom two
/// bits of the second byte are error/parity; both are discarded.
#[inline]
pub const fn decode_angle(rx: [u8; 2]) -> u16 {
    (((rx[0] & !ALARM_MASK) as u16) << 6) | ((rx[1] >> 2) as u16)
}

/// Returns the alarm flags (top two bits of the first byte), shifted down.
#[inline]
pub const fn alarm_bits(rx: [u8; 2]) -> u8 {
    (rx[0] & ALARM_MASK) >> 6
}

/// Tilt relative to the zero reference, in raw angle units.
///
/// Negative when the sensor reads past the offset.
#[inline]
pub fn tilt_from_angle(angle: u16) -> i32 {
    ANGLE_OFFSET - i32::from(angle)
}
