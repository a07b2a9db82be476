//! Controller artwork loading.

use std::path::Path;

use egui::ColorImage;

use crate::error::{PadOverlayError, Result};

/// Decodes the controller image at `path` into an egui image.
///
/// # Errors
///
/// Returns [`PadOverlayError::Image`] if the file is missing or cannot be
/// decoded.
pub fn load_controller_image(path: &Path) -> Result<ColorImage> {
    let decoded = image::open(path).map_err(|source| PadOverlayError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
