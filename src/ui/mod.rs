//! # UI Module
//!
//! The three eframe windows: the live visualizer, the calibration tool and
//! the raw input inspector.
//!
//! Each window runs single-threaded on the eframe event loop. A tick drains
//! pending input events, reads the controller, paints, and asks for the next
//! repaint one frame interval later.

pub mod assets;
pub mod calibrator;
pub mod inspector;
pub mod visualizer;

use egui::{Event, Pos2};

use crate::error::{PadOverlayError, Result};
use crate::layout::ScreenPoint;

pub use calibrator::{run_calibrator, CalibrationApp};
pub use inspector::{run_inspector, InspectorApp};
pub use visualizer::{run_visualizer, VisualizerApp};

/// Pixel under a pointer position.
#[must_use]
pub fn to_screen_point(pos: Pos2) -> ScreenPoint {
    ScreenPoint::new(pos.x.floor() as i32, pos.y.floor() as i32)
}

/// Positions of every pointer press among `events`, in arrival order.
///
/// Releases and pointer motion are ignored; any mouse button counts.
#[must_use]
pub fn clicked_points(events: &[Event]) -> Vec<ScreenPoint> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::PointerButton {
                pos, pressed: true, ..
            } => Some(to_screen_point(*pos)),
            _ => None,
        })
        .collect()
}

/// Whether the window was asked to close this frame, by the window manager
/// or with Escape.
#[must_use]
pub fn quit_requested(ctx: &egui::Context) -> bool {
    ctx.input(|i| i.viewport().close_requested() || i.key_pressed(egui::Key::Escape))
}

/// Fixed-size window options shared by the tools.
#[must_use]
pub fn native_options(title: &str, size: [f32; 2]) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size(size)
            .with_resizable(false),
        ..Default::default()
    }
}

/// Opens a window, builds the app from its egui context and runs it until
/// the window closes.
///
/// # Errors
///
/// Returns [`PadOverlayError::Window`] if the window cannot be created.
pub fn run_app<A, F>(title: &str, size: [f32; 2], create: F) -> Result<()>
where
    A: eframe::App + 'static,
    F: FnOnce(&egui::Context) -> A + 'static,
{
    eframe::run_native(
        title,
        native_options(title, size),
        Box::new(move |cc| Ok(Box::new(create(&cc.egui_ctx)))),
    )
    .map_err(|e| PadOverlayError::Window(e.to_string()))
}
