//! Raw input inspector window.

use std::time::Duration;

use egui::{Align2, Color32, Pos2};
use tracing::{error, info};

use crate::controller::InputSource;
use crate::error::Result;
use crate::inspector::report_lines;
use crate::overlay::draw::label_font;

use super::{quit_requested, run_app};

/// Title of the inspector window.
pub const INSPECTOR_TITLE: &str = "Xbox Controller Inspector";

/// Inspector window size.
pub const INSPECTOR_SIZE: [f32; 2] = [640.0, 500.0];

/// Where each report line is drawn.
///
/// Group headers sit at x = 20 and are followed by a 30 px gap; values are
/// indented to x = 40 at 20 px spacing; groups are 10 px apart.
#[must_use]
pub fn line_positions(lines: &[String]) -> Vec<Pos2> {
    let mut y = 20.0;
    let mut first_group = true;
    lines
        .iter()
        .map(|line| {
            if line.ends_with("):") {
                if !first_group {
                    y += 10.0;
                }
                first_group = false;
                let pos = Pos2::new(20.0, y);
                y += 30.0;
                pos
            } else {
                let pos = Pos2::new(40.0, y);
                y += 20.0;
                pos
            }
        })
        .collect()
}

/// The inspector window.
pub struct InspectorApp {
    input: Box<dyn InputSource>,
    frame_interval: Duration,
}

impl InspectorApp {
    #[must_use]
    pub fn new(input: Box<dyn InputSource>, frame_interval: Duration) -> Self {
        Self {
            input,
            frame_interval,
        }
    }
}

impl eframe::App for InspectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if quit_requested(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let lines = match self.input.snapshot() {
            Ok(snapshot) => report_lines(&snapshot),
            Err(e) => {
                error!("Lost the controller, closing: {}", e);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        };

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let painter = ui.painter();
                for (line, pos) in lines.iter().zip(line_positions(&lines)) {
                    painter.text(pos, Align2::LEFT_TOP, line, label_font(), Color32::WHITE);
                }
            });

        ctx.request_repaint_after(self.frame_interval);
    }
}

/// Opens the inspector window for `input` and runs it until closed.
///
/// # Errors
///
/// Returns error if the window cannot be created.
pub fn run_inspector(input: Box<dyn InputSource>, frame_interval: Duration) -> Result<()> {
    info!("Detected joystick: {}", input.name());
    run_app(INSPECTOR_TITLE, INSPECTOR_SIZE, move |_ctx| {
        InspectorApp::new(input, frame_interval)
    })
}
