//! Live controller overlay with rumble buttons.

use std::time::Duration;

use egui::{ColorImage, TextureHandle, TextureOptions};
use tracing::{error, info};

use crate::controller::InputSource;
use crate::error::Result;
use crate::haptic::{hit_test, HapticTrigger, RumbleButton, TriggerOutcome};
use crate::layout::{ControllerProfile, ScreenPoint};
use crate::overlay::draw::{paint_backdrop, paint_frame, paint_rumble_buttons};
use crate::overlay::OverlayFrame;

use super::{clicked_points, quit_requested, run_app};

/// Per-tick state of the visualizer, independent of the window.
pub struct VisualizerState {
    input: Box<dyn InputSource>,
    profile: ControllerProfile,
    haptic: Option<HapticTrigger>,
    rumble_buttons: Vec<RumbleButton>,
}

impl VisualizerState {
    /// `haptic` is `None` when force feedback is disabled; the window then
    /// has no rumble buttons.
    #[must_use]
    pub fn new(
        input: Box<dyn InputSource>,
        profile: ControllerProfile,
        haptic: Option<HapticTrigger>,
    ) -> Self {
        let rumble_buttons = if haptic.is_some() {
            RumbleButton::defaults()
        } else {
            Vec::new()
        };
        Self {
            input,
            profile,
            haptic,
            rumble_buttons,
        }
    }

    #[must_use]
    pub fn rumble_buttons(&self) -> &[RumbleButton] {
        &self.rumble_buttons
    }

    /// Fires the effect of the rumble button under `point`, if any.
    ///
    /// Blocks for the length of the effect.
    pub fn handle_click(&self, point: ScreenPoint) -> Option<TriggerOutcome> {
        let button = hit_test(&self.rumble_buttons, point)?;
        let trigger = self.haptic.as_ref()?;
        info!("{} rumble requested", button.label);
        Some(trigger.fire(&button.effect))
    }

    /// One tick: handle `clicks`, read the controller and compose the overlay.
    ///
    /// # Errors
    ///
    /// Returns error if the controller cannot be read.
    pub fn tick(&mut self, clicks: &[ScreenPoint]) -> Result<OverlayFrame> {
        for &point in clicks {
            self.handle_click(point);
        }

        let snapshot = self.input.snapshot()?;
        Ok(OverlayFrame::compose(&self.profile, &snapshot))
    }
}

/// The visualizer window.
pub struct VisualizerApp {
    state: VisualizerState,
    texture: TextureHandle,
    window: [f32; 2],
    frame_interval: Duration,
}

impl VisualizerApp {
    pub fn new(
        ctx: &egui::Context,
        state: VisualizerState,
        image: ColorImage,
        window: [f32; 2],
        frame_interval: Duration,
    ) -> Self {
        Self {
            state,
            texture: ctx.load_texture("controller", image, TextureOptions::LINEAR),
            window,
            frame_interval,
        }
    }
}

impl eframe::App for VisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if quit_requested(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let clicks = ctx.input(|i| clicked_points(&i.events));
        let frame = match self.state.tick(&clicks) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Lost the controller, closing: {}", e);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        };

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let painter = ui.painter();
                paint_backdrop(painter, &self.texture, self.window);
                paint_frame(painter, &frame);
                paint_rumble_buttons(painter, self.state.rumble_buttons());
            });

        ctx.request_repaint_after(self.frame_interval);
    }
}

/// Opens the visualizer window and runs it until closed.
///
/// # Errors
///
/// Returns error if the window cannot be created.
pub fn run_visualizer(
    title: &str,
    window: [f32; 2],
    frame_interval: Duration,
    image: ColorImage,
    state: VisualizerState,
) -> Result<()> {
    info!("Starting visualizer at {} ms per frame", frame_interval.as_millis());
    run_app(title, window, move |ctx| {
        VisualizerApp::new(ctx, state, image, window, frame_interval)
    })
}
