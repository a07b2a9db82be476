//! # Evdev Joystick Module
//!
//! Detects and opens a joystick through the Linux evdev interface and reads
//! its full state on demand.
//!
//! ## Device Detection
//!
//! Without an explicit device path, every `/dev/input/event*` node is probed in
//! sorted order and the first one that looks like a joystick is used:
//! - it reports `ABS_X`, and
//! - it has a gamepad (`BTN_SOUTH`) or joystick (`BTN_TRIGGER`) button.
//!
//! State is read with the `EVIOCGABS`/`EVIOCGKEY` ioctls, so every tick sees the
//! current values without replaying the event queue.

use std::path::{Path, PathBuf};

use evdev::{AbsoluteAxisType, Device, Key};
use tracing::{debug, info};

use super::snapshot::{AbsReading, ControllerSnapshot, SnapshotLayout};
use super::InputSource;
use crate::error::{PadOverlayError, Result};

/// Directory scanned for event devices.
const INPUT_DIR: &str = "/dev/input";

/// Joystick handle backed by an evdev device node.
pub struct EvdevJoystick {
    device: Device,
    device_path: PathBuf,
    name: String,
    layout: SnapshotLayout,
}

impl std::fmt::Debug for EvdevJoystick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevJoystick")
            .field("device_path", &self.device_path)
            .field("name", &self.name)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl EvdevJoystick {
    /// Detect and open the first available joystick
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: no joystick-like device could be opened
    /// - `Controller`: `/dev/input` is missing or unreadable
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pad_overlay::controller::{EvdevJoystick, InputSource};
    ///
    /// let joystick = EvdevJoystick::open_first()?;
    /// println!("Using joystick: {}", joystick.name());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open_first() -> Result<Self> {
        let input_dir = Path::new(INPUT_DIR);

        if !input_dir.exists() {
            return Err(PadOverlayError::Controller(format!(
                "{} directory not found",
                INPUT_DIR
            )));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| PadOverlayError::Controller(format!("Failed to read {}: {}", INPUT_DIR, e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PadOverlayError::Controller(format!("Failed to read directory entry: {}", e)))?;

        // Sorted so "first" means the same device on every run
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            let is_event_node = path
                .file_name()
                .map(|name| name.to_string_lossy().starts_with("event"))
                .unwrap_or(false);
            if !is_event_node {
                continue;
            }

            match Device::open(&path) {
                Ok(device) => {
                    debug!(
                        "Found input device: {} ({})",
                        path.display(),
                        device.name().unwrap_or("unnamed")
                    );

                    if looks_like_joystick(&device) {
                        return Ok(Self::from_device(device, path));
                    }
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(PadOverlayError::ControllerNotFound)
    }

    /// Open a specific event device
    ///
    /// # Errors
    ///
    /// Returns `Controller` if the node cannot be opened.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let device = Device::open(path).map_err(|e| {
            PadOverlayError::Controller(format!("Could not open {}: {}", path.display(), e))
        })?;
        Ok(Self::from_device(device, path.to_path_buf()))
    }

    /// Open `path` when given, otherwise auto-detect.
    ///
    /// # Errors
    ///
    /// See [`EvdevJoystick::open_first`] and [`EvdevJoystick::open_path`].
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::open_path(path),
            None => Self::open_first(),
        }
    }

    fn from_device(device: Device, device_path: PathBuf) -> Self {
        let abs_codes: Vec<u16> = device
            .supported_absolute_axes()
            .map(|axes| axes.iter().map(|axis| axis.0).collect())
            .unwrap_or_default();
        let key_codes: Vec<u16> = device
            .supported_keys()
            .map(|keys| keys.iter().map(|key| key.code()).collect())
            .unwrap_or_default();

        let layout = SnapshotLayout::from_capabilities(abs_codes, key_codes);
        let name = device.name().unwrap_or("Unknown joystick").to_string();

        info!(
            "Opened joystick '{}' at {} ({} axes, {} buttons, {} hats)",
            name,
            device_path.display(),
            layout.axis_count(),
            layout.button_count(),
            layout.hat_count()
        );

        Self {
            device,
            device_path,
            name,
            layout,
        }
    }

    /// Device node this joystick was opened from.
    pub fn device_path(&self) -> &Path {
        &self.device_path
    }

    pub fn layout(&self) -> &SnapshotLayout {
        &self.layout
    }
}

impl InputSource for EvdevJoystick {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn snapshot(&mut self) -> Result<ControllerSnapshot> {
        let abs = self.device.get_abs_state().map_err(|e| {
            PadOverlayError::Controller(format!("Failed to read axes from {}: {}", self.device_path.display(), e))
        })?;
        let keys = self.device.get_key_state().map_err(|e| {
            PadOverlayError::Controller(format!("Failed to read buttons from {}: {}", self.device_path.display(), e))
        })?;

        Ok(self.layout.read(
            |code| {
                abs.get(usize::from(code))
                    .map(|info| AbsReading {
                        value: info.value,
                        minimum: info.minimum,
                        maximum: info.maximum,
                    })
                    .unwrap_or(AbsReading {
                        value: 0,
                        minimum: 0,
                        maximum: 0,
                    })
            },
            |code| keys.contains(Key::new(code)),
        ))
    }
}

/// Whether a device has the axes and buttons of a joystick or gamepad.
fn looks_like_joystick(device: &Device) -> bool {
    let has_stick = device
        .supported_absolute_axes()
        .map(|axes| axes.contains(AbsoluteAxisType::ABS_X))
        .unwrap_or(false);
    let has_buttons = device
        .supported_keys()
        .map(|keys| keys.contains(Key::BTN_SOUTH) || keys.contains(Key::BTN_TRIGGER))
        .unwrap_or(false);
    has_stick && has_buttons
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration test - only runs with real hardware
    #[test]
    #[ignore]
    fn test_open_first_with_real_hardware() {
        let result = EvdevJoystick::open_first();
        assert!(result.is_ok(), "Should detect a connected joystick");

        let joystick = result.unwrap();
        assert!(joystick
            .device_path()
            .to_string_lossy()
            .starts_with("/dev/input/event"));
        assert!(joystick.layout().axis_count() > 0);
    }

    // Integration test - only runs with real hardware
    #[test]
    #[ignore]
    fn test_snapshot_with_real_hardware() {
        let mut joystick = EvdevJoystick::open_first().expect("Joystick not found");
        let snapshot = joystick.snapshot().expect("Snapshot failed");

        assert_eq!(snapshot.axes.len(), joystick.layout().axis_count());
        assert_eq!(snapshot.buttons.len(), joystick.layout().button_count());
        assert_eq!(snapshot.hats.len(), joystick.layout().hat_count());
        assert!(snapshot.axes.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_open_path_missing_device() {
        let result = EvdevJoystick::open_path("/nonexistent/event99");
        assert!(matches!(result, Err(PadOverlayError::Controller(_))));
    }
}
