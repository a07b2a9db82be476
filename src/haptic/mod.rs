//! # Haptic Module
//!
//! Fire-and-forget force-feedback effects.
//!
//! [`HapticTrigger::fire`] runs one effect start to finish:
//!
//! 1. open the force-feedback device
//! 2. upload the effect and get its id
//! 3. play it once
//! 4. sleep for the effect duration
//! 5. erase the effect and close the device
//!
//! The call blocks for the whole effect. A device that cannot be opened is
//! reported and skipped; nothing is ever raised to the caller.

pub mod buttons;
pub mod effect;
pub mod evdev_ff;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

pub use buttons::{hit_test, RumbleButton};
pub use effect::{HapticEffect, Waveform};
pub use evdev_ff::EvdevHapticBackend;

/// Identifier the device assigns to an uploaded effect.
pub type EffectId = u16;

/// An open force-feedback device.
#[cfg_attr(test, mockall::automock)]
pub trait HapticDevice {
    /// Uploads `effect` and returns the id the device assigned to it.
    fn upload(&mut self, effect: &HapticEffect) -> io::Result<EffectId>;

    /// Starts playback of an uploaded effect once.
    fn play(&mut self, id: EffectId) -> io::Result<()>;

    /// Removes an uploaded effect from the device.
    fn erase(&mut self, id: EffectId) -> io::Result<()>;
}

/// Opens force-feedback devices by path.
#[cfg_attr(test, mockall::automock)]
pub trait HapticBackend {
    fn open(&self, path: &Path) -> io::Result<Box<dyn HapticDevice>>;
}

/// What happened to one trigger request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The effect was uploaded, played for its duration and erased.
    Played,
    /// The device could not be opened; nothing was sent.
    DeviceUnavailable,
    /// The device opened but rejected the upload or playback.
    Failed,
}

/// Plays haptic effects on one configured device.
pub struct HapticTrigger {
    backend: Box<dyn HapticBackend>,
    device_path: PathBuf,
    sleep: fn(Duration),
}

impl std::fmt::Debug for HapticTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HapticTrigger")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl HapticTrigger {
    #[must_use]
    pub fn new(backend: Box<dyn HapticBackend>, device_path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            device_path: device_path.into(),
            sleep: std::thread::sleep,
        }
    }

    /// Trigger backed by the evdev force-feedback interface.
    #[must_use]
    pub fn evdev(device_path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(EvdevHapticBackend), device_path)
    }

    /// Replaces the function used to wait for the effect to finish.
    #[must_use]
    pub fn with_sleep(mut self, sleep: fn(Duration)) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn device_path(&self) -> &Path {
        &self.device_path
    }

    /// Plays `effect` once, blocking until it has finished.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pad_overlay::haptic::{HapticEffect, HapticTrigger};
    ///
    /// let trigger = HapticTrigger::evdev("/dev/input/event7");
    /// trigger.fire(&HapticEffect::strong_rumble());
    /// ```
    pub fn fire(&self, effect: &HapticEffect) -> TriggerOutcome {
        let mut device = match self.backend.open(&self.device_path) {
            Ok(device) => device,
            Err(e) => {
                warn!("Could not open {}: {}", self.device_path.display(), e);
                return TriggerOutcome::DeviceUnavailable;
            }
        };

        let id = match device.upload(effect) {
            Ok(id) => id,
            Err(e) => {
                warn!("Failed to upload effect to {}: {}", self.device_path.display(), e);
                return TriggerOutcome::Failed;
            }
        };

        let outcome = match device.play(id) {
            Ok(()) => {
                (self.sleep)(effect.duration());
                TriggerOutcome::Played
            }
            Err(e) => {
                warn!("Failed to play effect {} on {}: {}", id, self.device_path.display(), e);
                TriggerOutcome::Failed
            }
        };

        if let Err(e) = device.erase(id) {
            warn!("Failed to erase effect {} on {}: {}", id, self.device_path.display(), e);
        }

        if outcome == TriggerOutcome::Played {
            info!(
                "Played {} effect for {} ms",
                effect_kind(effect),
                effect.duration().as_millis()
            );
        }
        outcome
    }
}

fn effect_kind(effect: &HapticEffect) -> &'static str {
    match effect {
        HapticEffect::Rumble { .. } => "rumble",
        HapticEffect::Periodic { .. } => "periodic",
    }
}
