//! Trait definitions for the devices the monitor drives.
//!
//! These abstractions let the sampling loop run against the real Linux
//! devices or against desktop mocks.
//!
//! # Submodules
//!
//! - `hardware`: Tachometer and tilt sensor
//! - `display`: Character LCD
//!
//! The inter-cycle pause uses [`embedded_hal::delay::DelayNs`] rather than a
//! trait of its own.

pub mod display;
pub mod hardware;

pub use display::*;
pub use hardware::*;
