//! Low-level drawing primitives for the overlay windows
//!
//! Paints composed overlay frames, rumble buttons and calibration markers
//! with an egui [`Painter`]. Window coordinates and [`ScreenPoint`]s are the
//! same space: origin top-left, one unit per logical pixel.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, TextureHandle};

use super::OverlayFrame;
use crate::haptic::RumbleButton;
use crate::layout::{CoordinateTable, ScreenPoint};

/// Window background behind the controller image.
pub const BACKGROUND: Color32 = Color32::WHITE;
/// Pressed-button highlight and calibration marker colour.
pub const HIGHLIGHT: Color32 = Color32::from_rgb(255, 0, 0);
/// Stick dot colour.
pub const STICK_DOT: Color32 = Color32::from_rgb(0, 255, 0);
/// Rumble button fill.
pub const RUMBLE_FILL: Color32 = Color32::from_rgb(200, 200, 200);
/// Text colour over the light background.
pub const TEXT: Color32 = Color32::BLACK;

/// Radius of the marker left at each calibrated position.
pub const MARKER_RADIUS: f32 = 8.0;

/// Left edge and first baseline of the debug text block.
const DEBUG_TEXT_ORIGIN: Pos2 = Pos2::new(10.0, 10.0);
/// Vertical distance between debug text lines.
const DEBUG_LINE_SPACING: f32 = 25.0;

#[must_use]
pub fn to_pos2(point: ScreenPoint) -> Pos2 {
    Pos2::new(point.x as f32, point.y as f32)
}

/// Font used for every label in the tools.
#[must_use]
pub fn label_font() -> FontId {
    FontId::proportional(18.0)
}

/// Where the controller image goes inside the window.
///
/// Images larger than the window are scaled down to fit, keeping their
/// aspect ratio; smaller images keep their size. The result is centred.
///
/// ```
/// use pad_overlay::overlay::draw::fit_image;
///
/// let rect = fit_image([1280, 640], [640.0, 640.0]);
/// assert_eq!(rect.width(), 640.0);
/// assert_eq!(rect.height(), 320.0);
/// assert_eq!(rect.min.y, 160.0);
/// ```
#[must_use]
pub fn fit_image(image_size: [usize; 2], window: [f32; 2]) -> Rect {
    let (mut width, mut height) = (image_size[0] as f32, image_size[1] as f32);

    if width > window[0] || height > window[1] {
        let scale = (window[0] / width).min(window[1] / height);
        width = (width * scale).floor();
        height = (height * scale).floor();
    }

    let left = ((window[0] - width) / 2.0).floor();
    let top = ((window[1] - height) / 2.0).floor();
    Rect::from_min_size(Pos2::new(left, top), egui::vec2(width, height))
}

/// Clears the window and draws the controller image.
pub fn paint_backdrop(painter: &Painter, texture: &TextureHandle, window: [f32; 2]) {
    let full = Rect::from_min_size(Pos2::ZERO, egui::vec2(window[0], window[1]));
    painter.rect_filled(full, 0.0, BACKGROUND);

    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    painter.image(texture.id(), fit_image(texture.size(), window), uv, Color32::WHITE);
}

/// Draws highlights, stick dots and debug text of one frame.
pub fn paint_frame(painter: &Painter, frame: &OverlayFrame) {
    for highlight in &frame.highlights {
        painter.circle_filled(to_pos2(highlight.center), highlight.radius, HIGHLIGHT);
    }

    for dot in &frame.stick_dots {
        painter.circle_filled(to_pos2(dot.position), dot.radius, STICK_DOT);
    }

    paint_text_lines(painter, DEBUG_TEXT_ORIGIN, DEBUG_LINE_SPACING, &frame.debug_lines);
}

/// Draws each rumble button as a filled disc with its label in the middle.
pub fn paint_rumble_buttons(painter: &Painter, buttons: &[RumbleButton]) {
    for button in buttons {
        let center = to_pos2(button.center);
        painter.circle_filled(center, button.radius as f32, RUMBLE_FILL);
        painter.text(center, Align2::CENTER_CENTER, &button.label, label_font(), TEXT);
    }
}

/// Draws a marker at every recorded position plus a `name: (x, y)` list.
pub fn paint_calibration_markers(painter: &Painter, table: &CoordinateTable) {
    let lines: Vec<String> = table
        .iter()
        .map(|(name, point)| format!("{}: {}", name, point))
        .collect();
    paint_text_lines(painter, Pos2::new(20.0, 20.0), 30.0, &lines);

    for (_, point) in table.iter() {
        painter.circle_filled(to_pos2(point), MARKER_RADIUS, HIGHLIGHT);
    }
}

/// Draws an instruction centred horizontally near the top of the window.
pub fn paint_prompt(painter: &Painter, window_width: f32, text: &str) {
    painter.text(
        Pos2::new(window_width / 2.0, 20.0),
        Align2::CENTER_TOP,
        text,
        label_font(),
        TEXT,
    );
}

/// Draws `lines` top to bottom starting at `origin`.
pub fn paint_text_lines(painter: &Painter, origin: Pos2, spacing: f32, lines: &[String]) {
    for (i, line) in lines.iter().enumerate() {
        painter.text(
            Pos2::new(origin.x, origin.y + spacing * i as f32),
            Align2::LEFT_TOP,
            line,
            label_font(),
            TEXT,
        );
    }
}
