//! # tach-lcd
//!
//! Reads a tachometer and a tilt sensor on an embedded Linux board and shows
//! RPM and tilt on a two-line character LCD, once per second.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the tach, the tilt sensor and the LCD
//! - **Pure transforms**: RPM and tilt conversions with the rig's calibration
//! - **Driver-exact payloads**: The LCD request struct matches the driver's C layout
//! - **Fail fast**: Any device error stops the loop with a distinct exit code
//! - **Clean shutdown**: SIGINT stops the loop at the next cycle boundary
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Device abstractions
//! - `transform` - Calibration constants and unit conversions
//! - `message` - LCD request payload and bounded formatting
//! - `monitor` - The sampling loop
//! - `app` - Device open order and process-level outcome
//! - `hal` - Concrete implementations (mock for testing, linux for the board)
//!
//! ## Example
//!
//! ```rust
//! use tach_lcd::{
//!     configure_display, Config, Monitor,
//!     hal::{MockLcd, MockTach, MockTilt},
//! };
//!
//! let mut tach = MockTach::new();
//! tach.queue_pulses(37);
//!
//! let lcd = configure_display(MockLcd::new()).unwrap();
//! let mut monitor = Monitor::new(tach, lcd, MockTilt::new(), &Config::default());
//!
//! // One cycle, no pause
//! let report = monitor.step().unwrap();
//! assert!((report.rpm - 160.0).abs() < 0.01);
//! assert_eq!(report.tilt, 2800);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Device open order and process-level outcome.
pub mod app;
/// Compiled-in configuration.
pub mod config;
/// Error taxonomy and exit codes.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// LCD request payload and bounded text formatting.
pub mod message;
/// The sampling loop.
pub mod monitor;
/// Cancellation token for the sampling loop.
pub mod shutdown;
/// Core traits for device abstraction.
pub mod traits;
/// Pure conversions from raw sensor units.
pub mod transform;

// Re-exports for convenience
pub use app::DeviceProvider;
pub use config::{Config, DevicePaths, SpiConfig};
pub use error::{Device, Error, ExitStatus};
pub use message::{DisplayLine, LcdCommand, LcdMessage};
pub use monitor::{configure_display, Configured, CycleReport, Monitor};
pub use shutdown::ShutdownFlag;
pub use traits::{LcdDisplay, TachSensor, TiltSensor};
