//! # Pad Inspect
//!
//! Lists every axis, button and hat the joystick reports, by index, updated
//! live. Useful for finding the indices to put in a controller profile.

use anyhow::{Context, Result};
use tracing::info;

use pad_overlay::config::Config;
use pad_overlay::controller::EvdevJoystick;
use pad_overlay::logging::init_logging;
use pad_overlay::ui::run_inspector;

fn main() -> Result<()> {
    let (config, _) = Config::load_from_env().context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Pad Inspect v{} starting...", env!("CARGO_PKG_VERSION"));

    let joystick = EvdevJoystick::open(config.controller.device_path())?;
    run_inspector(Box::new(joystick), config.window.frame_interval())?;

    Ok(())
}
