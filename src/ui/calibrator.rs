//! Calibration window: one click per button, then review.

use std::io::Write;
use std::time::Duration;

use egui::{ColorImage, TextureHandle, TextureOptions};
use tracing::{info, warn};

use crate::calibration::{CalibrationState, Calibrator};
use crate::error::Result;
use crate::layout::ScreenPoint;
use crate::overlay::draw::{paint_backdrop, paint_calibration_markers, paint_prompt};

use super::{clicked_points, quit_requested, run_app};

/// Title of the calibration window.
pub const CALIBRATION_TITLE: &str = "Xbox One Controller - Button Position Calibration";

/// Drives a [`Calibrator`] from window input and emits its output once.
#[derive(Debug)]
pub struct CalibrationSession {
    calibrator: Calibrator,
    printed: bool,
}

impl CalibrationSession {
    #[must_use]
    pub fn new(calibrator: Calibrator) -> Self {
        Self {
            calibrator,
            printed: false,
        }
    }

    #[must_use]
    pub fn calibrator(&self) -> &Calibrator {
        &self.calibrator
    }

    /// Feeds one frame of input.
    ///
    /// Returns the finished table the first time calibration reaches `Done`.
    pub fn process(&mut self, clicks: &[ScreenPoint], quit: bool) -> Option<String> {
        for &point in clicks {
            if self.calibrator.on_click(point).is_some() {
                self.calibrator.advance();
            }
        }

        if quit {
            self.calibrator.on_quit();
        }

        if self.printed {
            return None;
        }
        let output = self.calibrator.output()?;
        self.printed = true;
        Some(output)
    }
}

/// The calibration window.
pub struct CalibrationApp {
    session: CalibrationSession,
    texture: TextureHandle,
    window: [f32; 2],
    frame_interval: Duration,
}

impl CalibrationApp {
    pub fn new(
        ctx: &egui::Context,
        calibrator: Calibrator,
        image: ColorImage,
        window: [f32; 2],
        frame_interval: Duration,
    ) -> Self {
        Self {
            session: CalibrationSession::new(calibrator),
            texture: ctx.load_texture("controller", image, TextureOptions::LINEAR),
            window,
            frame_interval,
        }
    }
}

fn print_table(text: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
        warn!("Failed to write calibration result: {}", e);
    }
}

impl eframe::App for CalibrationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let quit = quit_requested(ctx);
        let clicks = ctx.input(|i| clicked_points(&i.events));

        if let Some(table) = self.session.process(&clicks, quit) {
            info!(
                "Calibration complete with {} positions",
                self.session.calibrator().table().len()
            );
            print_table(&table);
        }

        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let calibrator = self.session.calibrator();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let painter = ui.painter();
                paint_backdrop(painter, &self.texture, self.window);
                match calibrator.state() {
                    CalibrationState::Done => {
                        paint_calibration_markers(painter, calibrator.table());
                    }
                    _ => {
                        if let Some(prompt) = calibrator.prompt() {
                            paint_prompt(painter, self.window[0], &prompt);
                        }
                    }
                }
            });

        ctx.request_repaint_after(self.frame_interval);
    }
}

/// Opens the calibration window and runs it until closed.
///
/// # Errors
///
/// Returns error if the window cannot be created.
pub fn run_calibrator(
    window: [f32; 2],
    frame_interval: Duration,
    image: ColorImage,
    calibrator: Calibrator,
) -> Result<()> {
    info!(
        "Calibrating {} positions; click each button as prompted",
        calibrator.names().len()
    );
    run_app(CALIBRATION_TITLE, window, move |ctx| {
        CalibrationApp::new(ctx, calibrator, image, window, frame_interval)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(names: &[&str]) -> CalibrationSession {
        CalibrationSession::new(Calibrator::new(
            names.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn test_prints_once_when_done() {
        let mut session = session(&["A", "B"]);

        assert!(session.process(&[ScreenPoint::new(1, 2)], false).is_none());
        let output = session.process(&[ScreenPoint::new(3, 4)], false);
        assert_eq!(
            output.as_deref(),
            Some("[profile.positions]\n\"A\" = [1, 2]\n\"B\" = [3, 4]\n")
        );

        // Review mode: nothing more is printed
        assert!(session.process(&[ScreenPoint::new(5, 6)], false).is_none());
        assert!(session.process(&[], true).is_none());
    }

    #[test]
    fn test_several_clicks_in_one_frame() {
        let mut session = session(&["A", "B"]);
        let output = session.process(&[ScreenPoint::new(1, 2), ScreenPoint::new(3, 4)], false);
        assert!(output.is_some());
        assert_eq!(session.calibrator().table().len(), 2);
    }

    #[test]
    fn test_quit_midway_prints_nothing() {
        let mut session = session(&["A", "B"]);
        session.process(&[ScreenPoint::new(1, 2)], false);
        assert!(session.process(&[], true).is_none());
        assert_eq!(session.calibrator().state(), CalibrationState::Aborted);
    }

    #[test]
    fn test_empty_name_list_prints_on_first_frame() {
        let mut session = session(&[]);
        assert_eq!(session.process(&[], false).as_deref(), Some("[profile.positions]\n"));
    }
}
