//! # Calibration Module
//!
//! Records where each control sits on the controller image, one click per
//! control.
//!
//! ## States
//!
//! ```text
//! AwaitingClick(0) -> Recorded(0) -> AwaitingClick(1) -> ... -> Done
//!        \________________\__________________\____________-> Aborted (quit)
//! ```
//!
//! A click while awaiting records the exact pixel under the pointer for the
//! current name; [`Calibrator::advance`] then moves on to the next name or to
//! `Done`. Quitting before `Done` aborts and produces no output.
//!
//! ## Usage
//!
//! ```
//! use pad_overlay::calibration::{CalibrationState, Calibrator};
//! use pad_overlay::layout::ScreenPoint;
//!
//! let mut calibrator = Calibrator::new(vec!["A".to_string()]);
//! assert_eq!(calibrator.prompt().as_deref(), Some("Click on the 'A' button location"));
//!
//! calibrator.on_click(ScreenPoint::new(458, 333));
//! assert_eq!(calibrator.advance(), CalibrationState::Done);
//! assert_eq!(
//!     calibrator.output().as_deref(),
//!     Some("[profile.positions]\n\"A\" = [458, 333]\n")
//! );
//! ```

use tracing::{debug, info};

use crate::layout::{CoordinateTable, ScreenPoint};

/// Name of the table the printed positions belong in.
pub const POSITIONS_TABLE: &str = "profile.positions";

/// Where the workflow is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationState {
    /// Waiting for the click for name `i`.
    AwaitingClick(usize),
    /// Name `i` has just been recorded.
    Recorded(usize),
    /// Every name has a position.
    Done,
    /// The operator quit before finishing.
    Aborted,
}

impl CalibrationState {
    /// Whether no further clicks will be accepted.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}

/// Click-by-click calibration of a list of control names.
#[derive(Debug, Clone)]
pub struct Calibrator {
    names: Vec<String>,
    table: CoordinateTable,
    state: CalibrationState,
}

impl Calibrator {
    /// Starts a calibration asking for `names` in order.
    ///
    /// An empty list is complete from the start.
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let state = if names.is_empty() {
            CalibrationState::Done
        } else {
            CalibrationState::AwaitingClick(0)
        };
        Self {
            names,
            table: CoordinateTable::new(),
            state,
        }
    }

    #[must_use]
    pub fn state(&self) -> CalibrationState {
        self.state
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Positions recorded so far, in request order.
    #[must_use]
    pub fn table(&self) -> &CoordinateTable {
        &self.table
    }

    /// Name the next click will be recorded for.
    #[must_use]
    pub fn current_name(&self) -> Option<&str> {
        match self.state {
            CalibrationState::AwaitingClick(i) => self.names.get(i).map(String::as_str),
            _ => None,
        }
    }

    /// Instruction shown while awaiting a click.
    #[must_use]
    pub fn prompt(&self) -> Option<String> {
        self.current_name()
            .map(|name| format!("Click on the '{}' button location", name))
    }

    /// Records `point` for the current name.
    ///
    /// Returns the recorded name, or `None` when no click was expected.
    pub fn on_click(&mut self, point: ScreenPoint) -> Option<&str> {
        let CalibrationState::AwaitingClick(i) = self.state else {
            return None;
        };
        let name = self.names.get(i)?;

        info!("{} recorded at {}", name, point);
        self.table.insert(name.clone(), point);
        self.state = CalibrationState::Recorded(i);
        Some(name.as_str())
    }

    /// Moves past a recorded click to the next name or to `Done`.
    pub fn advance(&mut self) -> CalibrationState {
        if let CalibrationState::Recorded(i) = self.state {
            self.state = if i + 1 < self.names.len() {
                CalibrationState::AwaitingClick(i + 1)
            } else {
                CalibrationState::Done
            };
            debug!("Calibration state: {:?}", self.state);
        }
        self.state
    }

    /// Handles a quit request. Only unfinished calibrations abort.
    pub fn on_quit(&mut self) -> CalibrationState {
        if !self.state.is_terminal() {
            info!(
                "Calibration aborted after {} of {} positions",
                self.table.len(),
                self.names.len()
            );
            self.state = CalibrationState::Aborted;
        }
        self.state
    }

    /// The finished table as TOML, only once calibration is `Done`.
    #[must_use]
    pub fn output(&self) -> Option<String> {
        (self.state == CalibrationState::Done).then(|| self.table.to_toml(POSITIONS_TABLE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ControllerProfile;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn click(calibrator: &mut Calibrator, x: i32, y: i32) -> CalibrationState {
        calibrator.on_click(ScreenPoint::new(x, y));
        calibrator.advance()
    }

    #[test]
    fn test_starts_awaiting_first_name() {
        let calibrator = Calibrator::new(names(&["A", "B"]));
        assert_eq!(calibrator.state(), CalibrationState::AwaitingClick(0));
        assert_eq!(calibrator.current_name(), Some("A"));
        assert_eq!(
            calibrator.prompt().as_deref(),
            Some("Click on the 'A' button location")
        );
        assert!(calibrator.output().is_none());
    }

    #[test]
    fn test_click_records_then_advances() {
        let mut calibrator = Calibrator::new(names(&["A", "B"]));

        assert_eq!(calibrator.on_click(ScreenPoint::new(10, 20)), Some("A"));
        assert_eq!(calibrator.state(), CalibrationState::Recorded(0));
        assert!(calibrator.prompt().is_none());

        assert_eq!(calibrator.advance(), CalibrationState::AwaitingClick(1));
        assert_eq!(calibrator.current_name(), Some("B"));
    }

    #[test]
    fn test_full_run_records_every_click_in_order() {
        let profile = ControllerProfile::default();
        let order = profile.button_order();
        let mut calibrator = Calibrator::new(order.clone());

        for (i, _) in order.iter().enumerate() {
            let state = click(&mut calibrator, 100 + i as i32, 200 - i as i32);
            if i + 1 < order.len() {
                assert_eq!(state, CalibrationState::AwaitingClick(i + 1));
            } else {
                assert_eq!(state, CalibrationState::Done);
            }
        }

        let table = calibrator.table();
        assert_eq!(table.len(), order.len());
        let recorded: Vec<_> = table.iter().collect();
        for (i, (name, point)) in recorded.into_iter().enumerate() {
            assert_eq!(name, order[i]);
            assert_eq!(point, ScreenPoint::new(100 + i as i32, 200 - i as i32));
        }
    }

    #[test]
    fn test_output_after_done() {
        let mut calibrator = Calibrator::new(names(&["A", "View(Back)"]));
        click(&mut calibrator, 458, 333);
        click(&mut calibrator, 282, 297);

        assert_eq!(
            calibrator.output().as_deref(),
            Some("[profile.positions]\n\"A\" = [458, 333]\n\"View(Back)\" = [282, 297]\n")
        );
    }

    #[test]
    fn test_quit_before_done_produces_nothing() {
        let mut calibrator = Calibrator::new(names(&["A", "B", "X"]));
        click(&mut calibrator, 1, 1);

        assert_eq!(calibrator.on_quit(), CalibrationState::Aborted);
        assert!(calibrator.output().is_none());

        // Further clicks are ignored
        assert!(calibrator.on_click(ScreenPoint::new(5, 5)).is_none());
        assert_eq!(calibrator.advance(), CalibrationState::Aborted);
    }

    #[test]
    fn test_quit_while_recorded_aborts() {
        let mut calibrator = Calibrator::new(names(&["A"]));
        calibrator.on_click(ScreenPoint::new(1, 1));
        assert_eq!(calibrator.on_quit(), CalibrationState::Aborted);
        assert!(calibrator.output().is_none());
    }

    #[test]
    fn test_quit_after_done_keeps_output() {
        let mut calibrator = Calibrator::new(names(&["A"]));
        click(&mut calibrator, 458, 333);
        assert_eq!(calibrator.on_quit(), CalibrationState::Done);
        assert!(calibrator.output().is_some());
    }

    #[test]
    fn test_empty_names_is_done_immediately() {
        let calibrator = Calibrator::new(Vec::new());
        assert_eq!(calibrator.state(), CalibrationState::Done);
        assert_eq!(calibrator.output().as_deref(), Some("[profile.positions]\n"));
    }

    #[test]
    fn test_click_without_advance_is_ignored() {
        let mut calibrator = Calibrator::new(names(&["A", "B"]));
        calibrator.on_click(ScreenPoint::new(1, 2));
        assert!(calibrator.on_click(ScreenPoint::new(3, 4)).is_none());
        assert_eq!(calibrator.table().get("A"), Some(ScreenPoint::new(1, 2)));
        assert_eq!(calibrator.table().len(), 1);
    }

    #[test]
    fn test_same_spot_twice_is_kept() {
        let mut calibrator = Calibrator::new(names(&["A", "B"]));
        click(&mut calibrator, 50, 50);
        click(&mut calibrator, 50, 50);
        assert_eq!(calibrator.table().get("A"), calibrator.table().get("B"));
    }
}
