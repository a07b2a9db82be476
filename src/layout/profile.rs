//! # Controller Profile
//!
//! Describes one controller model: which hardware index each named button and
//! axis lives on, where the sticks and triggers are, and where every control
//! sits on the controller illustration.
//!
//! The built-in default is the Xbox One pad as exposed by the Linux `xpad`
//! driver:
//!
//! | Name | Button index | | Name | Axis index |
//! |------|--------------|-|------|------------|
//! | A | 0 | | LX | 0 |
//! | B | 1 | | LY | 1 |
//! | X | 2 | | LT | 2 |
//! | Y | 3 | | RX | 3 |
//! | LB | 4 | | RY | 4 |
//! | RB | 5 | | RT | 5 |
//! | View(Back) | 6 | | | |
//! | Menu(Start) | 7 | | | |
//! | Xbox | 8 | | | |
//! | LS_Click | 9 | | | |
//! | RS_Click | 10 | | | |

use std::collections::BTreeMap;

use serde::Deserialize;

use super::coordinates::{CoordinateTable, ScreenPoint};

/// Where an analog stick is drawn and which axes drive it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StickLayout {
    /// Short label used in debug text ("L", "R").
    pub name: String,
    /// Axis name for horizontal deflection.
    pub x_axis: String,
    /// Axis name for vertical deflection.
    pub y_axis: String,
    /// Take the centre from this entry of the coordinate table.
    #[serde(default)]
    pub center_control: Option<String>,
    /// Explicit centre; wins over `center_control`.
    #[serde(default)]
    pub center: Option<ScreenPoint>,
}

impl StickLayout {
    /// Resolves the stick centre against a coordinate table.
    ///
    /// Centres taken from the stick-click positions are an approximation:
    /// the click was recorded wherever the operator aimed, which is not
    /// necessarily the middle of the stick in the image.
    #[must_use]
    pub fn resolve_center(&self, positions: &CoordinateTable) -> Option<ScreenPoint> {
        self.center.or_else(|| {
            self.center_control
                .as_deref()
                .and_then(|name| positions.get(name))
        })
    }
}

/// Complete description of one controller model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ControllerProfile {
    #[serde(default = "default_name")]
    pub name: String,

    /// How far (pixels) a stick dot travels at full deflection.
    #[serde(default = "default_stick_radius")]
    pub stick_radius: i32,

    /// Radius of the marker drawn over a pressed button.
    #[serde(default = "default_highlight_radius")]
    pub highlight_radius: f32,

    /// Radius of the stick position dot.
    #[serde(default = "default_dot_radius")]
    pub dot_radius: f32,

    #[serde(default = "default_buttons")]
    pub buttons: BTreeMap<String, usize>,

    #[serde(default = "default_axes")]
    pub axes: BTreeMap<String, usize>,

    /// Axis names shown as trigger depth.
    #[serde(default = "default_triggers")]
    pub triggers: Vec<String>,

    #[serde(default = "default_sticks")]
    pub sticks: Vec<StickLayout>,

    #[serde(default = "default_positions")]
    pub positions: CoordinateTable,
}

impl Default for ControllerProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            stick_radius: default_stick_radius(),
            highlight_radius: default_highlight_radius(),
            dot_radius: default_dot_radius(),
            buttons: default_buttons(),
            axes: default_axes(),
            triggers: default_triggers(),
            sticks: default_sticks(),
            positions: default_positions(),
        }
    }
}

impl ControllerProfile {
    /// Button names ordered by hardware index (ties broken by name).
    ///
    /// This is the order the calibration workflow asks for clicks in.
    ///
    /// ```
    /// use pad_overlay::layout::ControllerProfile;
    ///
    /// let profile = ControllerProfile::default();
    /// let order = profile.button_order();
    /// assert_eq!(order.first().map(String::as_str), Some("A"));
    /// assert_eq!(order.last().map(String::as_str), Some("RS_Click"));
    /// ```
    #[must_use]
    pub fn button_order(&self) -> Vec<String> {
        let mut named: Vec<(&String, &usize)> = self.buttons.iter().collect();
        named.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        named.into_iter().map(|(name, _)| name.clone()).collect()
    }

    #[must_use]
    pub fn axis_index(&self, name: &str) -> Option<usize> {
        self.axes.get(name).copied()
    }

    /// Checks that every name the profile refers to resolves.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn check(&self) -> std::result::Result<(), String> {
        if self.stick_radius <= 0 {
            return Err("stick_radius must be greater than 0".to_string());
        }

        if self.highlight_radius <= 0.0 || self.dot_radius <= 0.0 {
            return Err("highlight_radius and dot_radius must be greater than 0".to_string());
        }

        for trigger in &self.triggers {
            if !self.axes.contains_key(trigger) {
                return Err(format!("trigger axis '{}' is not defined in axes", trigger));
            }
        }

        for stick in &self.sticks {
            for axis in [&stick.x_axis, &stick.y_axis] {
                if !self.axes.contains_key(axis) {
                    return Err(format!(
                        "stick '{}' uses axis '{}' which is not defined in axes",
                        stick.name, axis
                    ));
                }
            }

            if stick.resolve_center(&self.positions).is_none() {
                return Err(format!(
                    "stick '{}' needs a center or a center_control present in positions",
                    stick.name
                ));
            }
        }

        Ok(())
    }
}

fn default_name() -> String { "Xbox One".to_string() }
fn default_stick_radius() -> i32 { 30 }
fn default_highlight_radius() -> f32 { 15.0 }
fn default_dot_radius() -> f32 { 8.0 }

fn default_buttons() -> BTreeMap<String, usize> {
    [
        ("A", 0),
        ("B", 1),
        ("X", 2),
        ("Y", 3),
        ("LB", 4),
        ("RB", 5),
        ("View(Back)", 6),
        ("Menu(Start)", 7),
        ("Xbox", 8),
        ("LS_Click", 9),
        ("RS_Click", 10),
    ]
    .into_iter()
    .map(|(name, index)| (name.to_string(), index))
    .collect()
}

fn default_axes() -> BTreeMap<String, usize> {
    [("LX", 0), ("LY", 1), ("LT", 2), ("RX", 3), ("RY", 4), ("RT", 5)]
        .into_iter()
        .map(|(name, index)| (name.to_string(), index))
        .collect()
}

fn default_triggers() -> Vec<String> {
    vec!["LT".to_string(), "RT".to_string()]
}

fn default_sticks() -> Vec<StickLayout> {
    vec![
        StickLayout {
            name: "L".to_string(),
            x_axis: "LX".to_string(),
            y_axis: "LY".to_string(),
            center_control: Some("LS_Click".to_string()),
            center: None,
        },
        StickLayout {
            name: "R".to_string(),
            x_axis: "RX".to_string(),
            y_axis: "RY".to_string(),
            center_control: Some("RS_Click".to_string()),
            center: None,
        },
    ]
}

fn default_positions() -> CoordinateTable {
    [
        ("A", (458, 333)),
        ("B", (496, 297)),
        ("X", (424, 296)),
        ("Y", (458, 261)),
        ("LB", (182, 205)),
        ("RB", (456, 206)),
        ("View(Back)", (282, 297)),
        ("Menu(Start)", (360, 297)),
        ("Xbox", (322, 240)),
        ("LS_Click", (184, 294)),
        ("RS_Click", (392, 373)),
    ]
    .into_iter()
    .map(|(name, point)| (name.to_string(), ScreenPoint::from(point)))
    .collect()
}
