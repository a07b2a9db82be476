//! Raw input report for the inspector window.

use crate::controller::ControllerSnapshot;

/// Every value of `snapshot` as one line of text, grouped by kind.
///
/// ```
/// use pad_overlay::controller::{ControllerSnapshot, HatState};
/// use pad_overlay::inspector::report_lines;
///
/// let snapshot = ControllerSnapshot::new(vec![0.5], vec![true], vec![HatState::new(0, 1)]);
/// assert_eq!(
///     report_lines(&snapshot),
///     vec![
///         "Axes (1):",
///         "Axis 0: 0.500",
///         "Buttons (1):",
///         "Button 0: true",
///         "Hats (1):",
///         "Hat 0: (0, 1)",
///     ]
/// );
/// ```
#[must_use]
pub fn report_lines(snapshot: &ControllerSnapshot) -> Vec<String> {
    let mut lines =
        Vec::with_capacity(3 + snapshot.axes.len() + snapshot.buttons.len() + snapshot.hats.len());

    lines.push(format!("Axes ({}):", snapshot.axes.len()));
    lines.extend(
        snapshot
            .axes
            .iter()
            .enumerate()
            .map(|(i, value)| format!("Axis {}: {:.3}", i, value)),
    );

    lines.push(format!("Buttons ({}):", snapshot.buttons.len()));
    lines.extend(
        snapshot
            .buttons
            .iter()
            .enumerate()
            .map(|(i, pressed)| format!("Button {}: {}", i, pressed)),
    );

    lines.push(format!("Hats ({}):", snapshot.hats.len()));
    lines.extend(
        snapshot
            .hats
            .iter()
            .enumerate()
            .map(|(i, hat)| format!("Hat {}: {}", i, hat)),
    );

    lines
}
