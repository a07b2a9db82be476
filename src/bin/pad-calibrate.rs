//! # Pad Calibrate
//!
//! Asks for one click on every button of the controller image, in button
//! index order, and prints the recorded positions as a TOML table ready to
//! paste into the `[profile.positions]` section of the configuration.
//!
//! After the last click the window stays open in review mode, marking every
//! recorded position. Closing the window early prints nothing.

use anyhow::{Context, Result};
use tracing::info;

use pad_overlay::calibration::Calibrator;
use pad_overlay::config::Config;
use pad_overlay::logging::init_logging;
use pad_overlay::ui::assets::load_controller_image;
use pad_overlay::ui::run_calibrator;

fn main() -> Result<()> {
    let (config, _) = Config::load_from_env().context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Pad Calibrate v{} starting...", env!("CARGO_PKG_VERSION"));

    let image = load_controller_image(&config.window.resolved_image_path())?;
    let calibrator = Calibrator::new(config.profile.button_order());

    run_calibrator(
        config.window.size(),
        config.window.frame_interval(),
        image,
        calibrator,
    )?;

    Ok(())
}
