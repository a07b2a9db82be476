//! # Pad Visualizer
//!
//! Shows live controller input on top of a picture of the controller.
//!
//! Pressed buttons light up in red at their calibrated positions, each analog
//! stick is drawn as a green dot moving around its centre, and trigger, stick
//! and D-pad values are printed in the top-left corner. Three round buttons
//! along the bottom play a strong rumble, a weak rumble and a sine pulse on
//! the controller.
//!
//! # Control Flow
//!
//! 1. **Initialization**
//!    - Load configuration (`$PAD_OVERLAY_CONFIG`, `config/default.toml` or
//!      built-in defaults)
//!    - Set up logging with tracing subscriber
//!    - Decode the controller image and open the joystick
//!
//! 2. **Render Loop** (30 Hz by default)
//!    - Fire the rumble effect under each click
//!    - Read the controller and draw the overlay
//!
//! 3. **Shutdown**
//!    - Closing the window exits; losing the controller is logged and closes
//!      the window
//!
//! # Errors
//!
//! Exits with an error if the configuration, image or joystick cannot be
//! loaded.

use anyhow::{Context, Result};
use tracing::info;

use pad_overlay::config::Config;
use pad_overlay::controller::EvdevJoystick;
use pad_overlay::haptic::HapticTrigger;
use pad_overlay::logging::init_logging;
use pad_overlay::ui::assets::load_controller_image;
use pad_overlay::ui::run_visualizer;
use pad_overlay::ui::visualizer::VisualizerState;

fn main() -> Result<()> {
    let (config, config_path) = Config::load_from_env().context("Failed to load configuration")?;

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Pad Visualizer v{} starting...", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("No configuration file found, using built-in defaults"),
    }

    let image = load_controller_image(&config.window.resolved_image_path())?;
    let joystick = EvdevJoystick::open(config.controller.device_path())?;

    let haptic = if config.haptic.enabled {
        info!("Rumble buttons play on {}", config.haptic.device_path);
        Some(HapticTrigger::evdev(&config.haptic.device_path))
    } else {
        info!("Haptics disabled");
        None
    };

    let state = VisualizerState::new(Box::new(joystick), config.profile.clone(), haptic);
    run_visualizer(
        &config.window.title,
        config.window.size(),
        config.window.frame_interval(),
        image,
        state,
    )?;

    info!("Window closed, exiting");
    Ok(())
}
