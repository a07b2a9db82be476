//! On-screen rumble buttons.
//!
//! Three round buttons along the bottom of the visualizer window; clicking
//! one fires its bound [`HapticEffect`].

use super::effect::HapticEffect;
use crate::layout::ScreenPoint;

/// Hit radius shared by the built-in buttons.
pub const RUMBLE_BUTTON_RADIUS: u32 = 30;

/// A clickable circle bound to one effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RumbleButton {
    pub label: String,
    pub center: ScreenPoint,
    pub radius: u32,
    pub effect: HapticEffect,
}

impl RumbleButton {
    #[must_use]
    pub fn new(label: impl Into<String>, center: ScreenPoint, radius: u32, effect: HapticEffect) -> Self {
        Self {
            label: label.into(),
            center,
            radius,
            effect,
        }
    }

    /// The Strong, Weak and Sine buttons in a row near the bottom.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Strong", ScreenPoint::new(180, 580), RUMBLE_BUTTON_RADIUS, HapticEffect::strong_rumble()),
            Self::new("Weak", ScreenPoint::new(320, 580), RUMBLE_BUTTON_RADIUS, HapticEffect::weak_rumble()),
            Self::new("Sine", ScreenPoint::new(460, 580), RUMBLE_BUTTON_RADIUS, HapticEffect::sine()),
        ]
    }

    /// Whether `point` is inside the button; the rim counts as inside.
    ///
    /// ```
    /// use pad_overlay::haptic::{HapticEffect, RumbleButton};
    /// use pad_overlay::layout::ScreenPoint;
    ///
    /// let button = RumbleButton::new("Strong", ScreenPoint::new(180, 580), 30, HapticEffect::strong_rumble());
    /// assert!(button.contains(ScreenPoint::new(210, 580)));
    /// assert!(!button.contains(ScreenPoint::new(211, 580)));
    /// ```
    #[must_use]
    pub fn contains(&self, point: ScreenPoint) -> bool {
        let radius = i64::from(self.radius);
        self.center.distance_squared(point) <= radius * radius
    }
}

/// First button under `point`, if any.
#[must_use]
pub fn hit_test(buttons: &[RumbleButton], point: ScreenPoint) -> Option<&RumbleButton> {
    buttons.iter().find(|button| button.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong() -> RumbleButton {
        RumbleButton::new("Strong", ScreenPoint::new(180, 580), 30, HapticEffect::strong_rumble())
    }

    #[test]
    fn test_centre_hits() {
        assert!(strong().contains(ScreenPoint::new(180, 580)));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let button = strong();
        assert!(button.contains(ScreenPoint::new(150, 580)));
        assert!(button.contains(ScreenPoint::new(180, 550)));
        assert!(button.contains(ScreenPoint::new(180, 610)));
        // 18² + 24² = 30²
        assert!(button.contains(ScreenPoint::new(198, 604)));
    }

    #[test]
    fn test_just_outside_misses() {
        let button = strong();
        assert!(!button.contains(ScreenPoint::new(149, 580)));
        assert!(!button.contains(ScreenPoint::new(199, 604)));
        // Inside the bounding square, outside the circle
        assert!(!button.contains(ScreenPoint::new(205, 605)));
    }

    #[test]
    fn test_defaults() {
        let buttons = RumbleButton::defaults();
        let labels: Vec<_> = buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Strong", "Weak", "Sine"]);
        assert!(buttons.iter().all(|b| b.radius == 30));
        assert_eq!(buttons[2].effect, HapticEffect::sine());
    }

    #[test]
    fn test_hit_test_picks_button() {
        let buttons = RumbleButton::defaults();
        assert_eq!(
            hit_test(&buttons, ScreenPoint::new(320, 600)).map(|b| b.label.as_str()),
            Some("Weak")
        );
        assert_eq!(
            hit_test(&buttons, ScreenPoint::new(460, 550)).map(|b| b.label.as_str()),
            Some("Sine")
        );
        assert!(hit_test(&buttons, ScreenPoint::new(250, 580)).is_none());
        assert!(hit_test(&buttons, ScreenPoint::new(0, 0)).is_none());
    }
}
