//! Embedded Linux tachometer/tilt readout.
//!
//! This is the main entry point for the board. It:
//! - Installs the SIGINT handler
//! - Opens the tach, the LCD and the tilt sensor, in that order
//! - Clears the LCD and hides the cursor
//! - Prints RPM on line 1 and tilt on line 2 once per second
//! - Releases every device and exits on SIGINT or on the first device error
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Stopped by SIGINT |
//! | -1 | Tach device could not be opened |
//! | -2 | Short read from the tach |
//! | -3 | LCD rejected a line update |
//! | -4 | LCD device could not be opened |
//! | -5 | LCD rejected clear / cursor off |
//! | -6 | Tilt device could not be opened |
//! | -7 | Tilt SPI transfer failed |
//! | 1 | Signal handler could not be installed |
//!
//! The shell sees these modulo 256 (e.g. -2 as 254).
//!
//! # Logging
//!
//! Defaults to `info`; set `RUST_LOG=debug` to log every reading.

use anyhow::Context;
use log::{error, info};
use tach_lcd::app;
use tach_lcd::hal::linux::{signal, LinuxDevices, StdDelay};
use tach_lcd::{Config, ExitStatus};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let code = match run() {
        Ok(status) => status.code(),
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };
    std::process::exit(code);
}

fn run() -> anyhow::Result<ExitStatus> {
    let shutdown = signal::install().context("installing SIGINT handler")?;

    let config = Config::default();
    info!(
        "tach {} / lcd {} / tilt {}",
        config.devices.tach, config.devices.lcd, config.devices.tilt
    );

    let status = app::run(&mut LinuxDevices::new(), &config, &mut StdDelay, shutdown);

    if let Some(signum) = signal::last_signal() {
        info!("Exiting from a signal trap: {}", signum);
    }
    Ok(status)
}
