//! # Controller Module
//!
//! Game controller input handling.
//!
//! This module handles:
//! - Joystick detection and connection via evdev
//! - Reading axes, buttons and hats into an index-addressed snapshot
//! - Normalizing raw axis ranges

pub mod joystick;
pub mod snapshot;

pub use joystick::EvdevJoystick;
pub use snapshot::{ControllerSnapshot, HatState};

use crate::error::Result;

/// Anything that can report the full state of one controller.
///
/// The render loops read one snapshot per tick through this trait.
#[cfg_attr(test, mockall::automock)]
pub trait InputSource {
    /// Human-readable device name.
    fn name(&self) -> String;

    /// Reads axes, buttons and hats as they are right now.
    ///
    /// # Errors
    ///
    /// Returns an error when the device can no longer be read (for example
    /// after it was unplugged).
    fn snapshot(&mut self) -> Result<ControllerSnapshot>;
}
