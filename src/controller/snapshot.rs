//! # Controller Snapshot Module
//!
//! Turns the raw evdev state of a joystick into a [`ControllerSnapshot`]: three
//! ordered lists (axes, buttons, hats) addressed purely by index, the way a
//! controller profile refers to them.
//!
//! ## Index Assignment
//!
//! | List | Source | Order |
//! |------|--------|-------|
//! | Axes | supported `EV_ABS` codes, hat axes excluded | ascending code |
//! | Buttons | supported `EV_KEY` codes `>= BTN_MISC` | ascending code |
//! | Hats | `ABS_HAT0X/Y` .. `ABS_HAT3X/Y` pairs | hat number |
//!
//! For an Xbox One pad on `xpad` this yields `LX, LY, LT, RX, RY, RT` for the
//! axes and `A, B, X, Y, LB, RB, View, Menu, Xbox, LS, RS` for the buttons.
//!
//! ## Value Ranges
//!
//! Every axis, triggers included, is normalized linearly from its
//! `absinfo` range to `-1.0..=1.0`. Trigger depth (`0.0..=1.0`) is derived
//! from that with [`trigger_depth`]. Hat Y is flipped so that up is `+1`.
//!
//! ```
//! use pad_overlay::controller::snapshot::{normalize_abs, trigger_depth};
//!
//! assert_eq!(normalize_abs(0, 0, 255), -1.0);
//! assert_eq!(normalize_abs(255, 0, 255), 1.0);
//! assert_eq!(trigger_depth(-1.0), 0.0);
//! assert_eq!(trigger_depth(1.0), 1.0);
//! ```

use std::fmt;

/// First key code used for buttons (`BTN_MISC` / `BTN_0`).
pub const BTN_MISC: u16 = 0x100;

/// `ABS_HAT0X`, the first hat axis.
pub const ABS_HAT0X: u16 = 0x10;

/// `ABS_HAT3Y`, the last hat axis.
pub const ABS_HAT3Y: u16 = 0x17;

/// Number of hats the kernel can report.
pub const MAX_HATS: u16 = 4;

/// Direction of a hat (D-pad), `x` right-positive and `y` up-positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HatState {
    pub x: i8,
    pub y: i8,
}

impl HatState {
    /// Creates a hat state, clamping each component to `-1..=1`.
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: x.clamp(-1, 1) as i8,
            y: y.clamp(-1, 1) as i8,
        }
    }

    /// Builds a hat state from evdev values, where Y is down-positive.
    #[must_use]
    pub fn from_evdev(x: i32, y: i32) -> Self {
        Self::new(x, y.saturating_neg())
    }
}

impl fmt::Display for HatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Full controller state read in one tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControllerSnapshot {
    /// Axis values, `-1.0..=1.0`.
    pub axes: Vec<f32>,
    /// Button states, `true` when pressed.
    pub buttons: Vec<bool>,
    /// Hat directions.
    pub hats: Vec<HatState>,
}

impl ControllerSnapshot {
    #[must_use]
    pub fn new(axes: Vec<f32>, buttons: Vec<bool>, hats: Vec<HatState>) -> Self {
        Self { axes, buttons, hats }
    }

    /// Axis value at `index`, if the controller has that axis.
    #[must_use]
    pub fn axis(&self, index: usize) -> Option<f32> {
        self.axes.get(index).copied()
    }

    /// Whether the button at `index` is pressed. Missing buttons read as released.
    #[must_use]
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn hat(&self, index: usize) -> Option<HatState> {
        self.hats.get(index).copied()
    }
}

/// One `absinfo` reading: current value and the reported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsReading {
    pub value: i32,
    pub minimum: i32,
    pub maximum: i32,
}

/// Maps a raw absolute value in `minimum..=maximum` to `-1.0..=1.0`.
///
/// A degenerate range reads as centred.
#[must_use]
pub fn normalize_abs(value: i32, minimum: i32, maximum: i32) -> f32 {
    if maximum <= minimum {
        return 0.0;
    }
    let span = (maximum as f64) - (minimum as f64);
    let scaled = ((value as f64) - (minimum as f64)) / span * 2.0 - 1.0;
    scaled.clamp(-1.0, 1.0) as f32
}

/// Converts a normalized trigger axis (`-1.0` released, `1.0` fully pressed)
/// into a depth in `0.0..=1.0`.
#[must_use]
pub fn trigger_depth(value: f32) -> f32 {
    ((value + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Which evdev codes feed which snapshot index.
///
/// Computed once from the device capabilities when the device is opened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnapshotLayout {
    axes: Vec<u16>,
    buttons: Vec<u16>,
    hats: Vec<(u16, u16)>,
}

impl SnapshotLayout {
    /// Builds the layout from the supported absolute axis and key codes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pad_overlay::controller::snapshot::SnapshotLayout;
    ///
    /// // ABS_X, ABS_Y, ABS_HAT0X, ABS_HAT0Y; KEY_A, BTN_SOUTH, BTN_EAST
    /// let layout = SnapshotLayout::from_capabilities([0x00, 0x01, 0x10, 0x11], [30, 0x130, 0x131]);
    /// assert_eq!(layout.axis_count(), 2);
    /// assert_eq!(layout.button_count(), 2);
    /// assert_eq!(layout.hat_count(), 1);
    /// ```
    #[must_use]
    pub fn from_capabilities(
        abs_codes: impl IntoIterator<Item = u16>,
        key_codes: impl IntoIterator<Item = u16>,
    ) -> Self {
        let mut abs: Vec<u16> = abs_codes.into_iter().collect();
        abs.sort_unstable();
        abs.dedup();

        let axes = abs
            .iter()
            .copied()
            .filter(|code| !(ABS_HAT0X..=ABS_HAT3Y).contains(code))
            .collect();

        let hats = (0..MAX_HATS)
            .map(|hat| (ABS_HAT0X + hat * 2, ABS_HAT0X + hat * 2 + 1))
            .filter(|(x, _)| abs.contains(x))
            .collect();

        let mut buttons: Vec<u16> = key_codes
            .into_iter()
            .filter(|code| *code >= BTN_MISC)
            .collect();
        buttons.sort_unstable();
        buttons.dedup();

        Self { axes, buttons, hats }
    }

    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    #[must_use]
    pub fn hat_count(&self) -> usize {
        self.hats.len()
    }

    /// Reads every mapped code and assembles a snapshot.
    ///
    /// `abs` returns the reading for an absolute axis code; `pressed` tells
    /// whether a key code is down.
    pub fn read<A, K>(&self, abs: A, pressed: K) -> ControllerSnapshot
    where
        A: Fn(u16) -> AbsReading,
        K: Fn(u16) -> bool,
    {
        let axes = self
            .axes
            .iter()
            .map(|&code| {
                let reading = abs(code);
                normalize_abs(reading.value, reading.minimum, reading.maximum)
            })
            .collect();

        let buttons = self.buttons.iter().map(|&code| pressed(code)).collect();

        let hats = self
            .hats
            .iter()
            .map(|&(x, y)| HatState::from_evdev(abs(x).value, abs(y).value))
            .collect();

        ControllerSnapshot { axes, buttons, hats }
    }
}
