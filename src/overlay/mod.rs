//! # Overlay Module
//!
//! Converts one [`ControllerSnapshot`] into the marks drawn over the controller
//! image: a highlight on every pressed button, a dot per analog stick, and a
//! few lines of debug text.
//!
//! Composition is pure; [`draw`] paints a composed frame with egui.
//!
//! ## Stick Dots
//!
//! Each axis moves the dot independently:
//!
//! `dot = centre + round(axis * stick_radius)`
//!
//! Rounding is half away from zero, so deflections in opposite directions land
//! the same distance from the centre.
//!
//! ```
//! use pad_overlay::overlay::stick_offset;
//!
//! assert_eq!(stick_offset(0.5, 30), 15);
//! assert_eq!(stick_offset(-0.5, 30), -15);
//! assert_eq!(stick_offset(1.0, 30), 30);
//! ```

pub mod draw;

use crate::controller::snapshot::trigger_depth;
use crate::controller::ControllerSnapshot;
use crate::layout::{ControllerProfile, ScreenPoint};

/// Marker over a pressed button.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub control: String,
    pub center: ScreenPoint,
    pub radius: f32,
}

/// Current position of one analog stick.
#[derive(Debug, Clone, PartialEq)]
pub struct StickDot {
    pub stick: String,
    pub center: ScreenPoint,
    pub position: ScreenPoint,
    pub radius: f32,
}

/// Everything drawn on top of the controller image for one tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayFrame {
    pub highlights: Vec<Highlight>,
    pub stick_dots: Vec<StickDot>,
    pub debug_lines: Vec<String>,
}

/// Pixel offset of a stick dot for one axis.
#[must_use]
pub fn stick_offset(axis: f32, stick_radius: i32) -> i32 {
    (axis * stick_radius as f32).round() as i32
}

impl OverlayFrame {
    /// Builds the overlay for `snapshot` using the layout in `profile`.
    ///
    /// Buttons without a coordinate table entry are not drawn. Axes the
    /// controller does not report read as centred sticks and released
    /// triggers.
    ///
    /// # Examples
    ///
    /// ```
    /// use pad_overlay::controller::ControllerSnapshot;
    /// use pad_overlay::layout::{ControllerProfile, ScreenPoint};
    /// use pad_overlay::overlay::OverlayFrame;
    ///
    /// let profile = ControllerProfile::default();
    /// let mut buttons = vec![false; 11];
    /// buttons[0] = true; // A
    /// let snapshot = ControllerSnapshot::new(vec![0.0; 6], buttons, vec![]);
    ///
    /// let frame = OverlayFrame::compose(&profile, &snapshot);
    /// assert_eq!(frame.highlights.len(), 1);
    /// assert_eq!(frame.highlights[0].center, ScreenPoint::new(458, 333));
    /// ```
    #[must_use]
    pub fn compose(profile: &ControllerProfile, snapshot: &ControllerSnapshot) -> Self {
        let mut highlights: Vec<Highlight> = profile
            .buttons
            .iter()
            .filter(|(_, index)| snapshot.button(**index))
            .filter_map(|(name, _)| {
                profile.positions.get(name).map(|center| Highlight {
                    control: name.clone(),
                    center,
                    radius: profile.highlight_radius,
                })
            })
            .collect();
        highlights.sort_by_key(|h| profile.buttons.get(&h.control).copied());

        let axis_value = |name: &str| {
            profile
                .axis_index(name)
                .and_then(|index| snapshot.axis(index))
        };

        let mut stick_dots = Vec::with_capacity(profile.sticks.len());
        let mut stick_texts = Vec::with_capacity(profile.sticks.len());
        for stick in &profile.sticks {
            let x = axis_value(&stick.x_axis).unwrap_or(0.0);
            let y = axis_value(&stick.y_axis).unwrap_or(0.0);
            stick_texts.push(format!("{}=({:.2},{:.2})", stick.name, x, y));

            if let Some(center) = stick.resolve_center(&profile.positions) {
                stick_dots.push(StickDot {
                    stick: stick.name.clone(),
                    center,
                    position: center.offset(
                        stick_offset(x, profile.stick_radius),
                        stick_offset(y, profile.stick_radius),
                    ),
                    radius: profile.dot_radius,
                });
            }
        }

        let trigger_texts: Vec<String> = profile
            .triggers
            .iter()
            .map(|name| {
                let depth = trigger_depth(axis_value(name).unwrap_or(-1.0));
                format!("{}={:.2}", name, depth)
            })
            .collect();

        let mut debug_lines = Vec::with_capacity(2 + snapshot.hats.len());
        if !trigger_texts.is_empty() {
            debug_lines.push(trigger_texts.join(", "));
        }
        if !stick_texts.is_empty() {
            debug_lines.push(stick_texts.join(", "));
        }
        debug_lines.extend(
            snapshot
                .hats
                .iter()
                .enumerate()
                .map(|(i, hat)| format!("Hat {} = {}", i, hat)),
        );

        Self {
            highlights,
            stick_dots,
            debug_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::HatState;

    fn idle_snapshot() -> ControllerSnapshot {
        // Sticks centred, triggers released
        ControllerSnapshot::new(
            vec![0.0, 0.0, -1.0, 0.0, 0.0, -1.0],
            vec![false; 11],
            vec![HatState::default()],
        )
    }

    // ==================== Offset Tests ====================

    #[test]
    fn test_stick_offset_rounds() {
        assert_eq!(stick_offset(0.0, 30), 0);
        assert_eq!(stick_offset(0.51, 30), 15);
        assert_eq!(stick_offset(0.49, 30), 15);
        assert_eq!(stick_offset(0.01, 30), 0);
        assert_eq!(stick_offset(-1.0, 30), -30);
    }

    #[test]
    fn test_stick_offset_symmetry() {
        for step in 0..=100 {
            let a = step as f32 / 100.0;
            assert_eq!(stick_offset(-a, 30), -stick_offset(a, 30), "axis {}", a);
        }
    }

    #[test]
    fn test_stick_offset_half_rounds_away_from_zero() {
        // 0.05 * 30 = 1.5
        assert_eq!(stick_offset(0.05, 30), 2);
        assert_eq!(stick_offset(-0.05, 30), -2);
    }

    // ==================== Highlight Tests ====================

    #[test]
    fn test_idle_has_no_highlights() {
        let frame = OverlayFrame::compose(&ControllerProfile::default(), &idle_snapshot());
        assert!(frame.highlights.is_empty());
    }

    #[test]
    fn test_a_pressed_highlights_exact_position() {
        let profile = ControllerProfile::default();
        let mut snapshot = idle_snapshot();
        snapshot.buttons[0] = true;

        let frame = OverlayFrame::compose(&profile, &snapshot);
        assert_eq!(
            frame.highlights,
            vec![Highlight {
                control: "A".to_string(),
                center: ScreenPoint::new(458, 333),
                radius: 15.0,
            }]
        );
    }

    #[test]
    fn test_multiple_highlights_in_index_order() {
        let profile = ControllerProfile::default();
        let mut snapshot = idle_snapshot();
        snapshot.buttons[10] = true; // RS_Click
        snapshot.buttons[4] = true; // LB

        let frame = OverlayFrame::compose(&profile, &snapshot);
        let names: Vec<_> = frame.highlights.iter().map(|h| h.control.as_str()).collect();
        assert_eq!(names, vec!["LB", "RS_Click"]);
    }

    #[test]
    fn test_pressed_button_without_position_is_skipped() {
        let mut profile = ControllerProfile::default();
        profile.buttons.insert("Paddle".to_string(), 11);
        let mut snapshot = idle_snapshot();
        snapshot.buttons.push(true);

        let frame = OverlayFrame::compose(&profile, &snapshot);
        assert!(frame.highlights.is_empty());
    }

    #[test]
    fn test_missing_button_index_reads_released() {
        let profile = ControllerProfile::default();
        let snapshot = ControllerSnapshot::new(vec![], vec![true], vec![]);

        let frame = OverlayFrame::compose(&profile, &snapshot);
        assert_eq!(frame.highlights.len(), 1);
        assert_eq!(frame.highlights[0].control, "A");
    }

    // ==================== Stick Tests ====================

    #[test]
    fn test_centred_sticks_sit_on_centre() {
        let frame = OverlayFrame::compose(&ControllerProfile::default(), &idle_snapshot());
        assert_eq!(frame.stick_dots.len(), 2);
        assert_eq!(frame.stick_dots[0].position, ScreenPoint::new(184, 294));
        assert_eq!(frame.stick_dots[1].position, ScreenPoint::new(392, 373));
    }

    #[test]
    fn test_stick_deflection() {
        let mut snapshot = idle_snapshot();
        snapshot.axes[0] = 1.0; // LX right
        snapshot.axes[1] = -0.5; // LY up
        snapshot.axes[3] = -1.0; // RX left
        snapshot.axes[4] = 0.25; // RY down

        let frame = OverlayFrame::compose(&ControllerProfile::default(), &snapshot);
        assert_eq!(frame.stick_dots[0].position, ScreenPoint::new(184 + 30, 294 - 15));
        assert_eq!(frame.stick_dots[1].position, ScreenPoint::new(392 - 30, 373 + 8));
        assert_eq!(frame.stick_dots[0].radius, 8.0);
    }

    #[test]
    fn test_stick_at_coordinate_limit_saturates() {
        let mut profile = ControllerProfile::default();
        profile.sticks[0].center = Some(ScreenPoint::new(i32::MAX, 0));
        assert!(profile.check().is_ok());

        let mut snapshot = idle_snapshot();
        snapshot.axes[0] = 1.0;
        snapshot.axes[1] = 1.0;

        let frame = OverlayFrame::compose(&profile, &snapshot);
        assert_eq!(frame.stick_dots[0].position, ScreenPoint::new(i32::MAX, 30));
    }

    #[test]
    fn test_missing_axes_read_centred() {
        let snapshot = ControllerSnapshot::default();
        let frame = OverlayFrame::compose(&ControllerProfile::default(), &snapshot);
        assert_eq!(frame.stick_dots[0].position, ScreenPoint::new(184, 294));
        assert_eq!(frame.debug_lines[0], "LT=0.00, RT=0.00");
    }

    // ==================== Debug Text Tests ====================

    #[test]
    fn test_debug_lines() {
        let mut snapshot = idle_snapshot();
        snapshot.axes[2] = 1.0; // LT fully pressed
        snapshot.axes[5] = 0.0; // RT half way
        snapshot.axes[0] = 0.25;
        snapshot.axes[4] = -1.0;
        snapshot.hats[0] = HatState::new(0, 1);

        let frame = OverlayFrame::compose(&ControllerProfile::default(), &snapshot);
        assert_eq!(
            frame.debug_lines,
            vec![
                "LT=1.00, RT=0.50".to_string(),
                "L=(0.25,0.00), R=(0.00,-1.00)".to_string(),
                "Hat 0 = (0, 1)".to_string(),
            ]
        );
    }

    #[test]
    fn test_one_line_per_hat() {
        let mut snapshot = idle_snapshot();
        snapshot.hats = vec![HatState::new(1, 0), HatState::new(-1, -1)];

        let frame = OverlayFrame::compose(&ControllerProfile::default(), &snapshot);
        assert_eq!(frame.debug_lines.len(), 4);
        assert_eq!(frame.debug_lines[2], "Hat 0 = (1, 0)");
        assert_eq!(frame.debug_lines[3], "Hat 1 = (-1, -1)");
    }
}
