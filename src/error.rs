//! # Error Types
//!
//! Custom error types for Pad Overlay using `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for Pad Overlay
#[derive(Debug, Error)]
pub enum PadOverlayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The controller illustration could not be read or decoded
    #[error("Could not load image from '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// No joystick-like input device was found
    #[error("No joystick connected!")]
    ControllerNotFound,

    /// The input device could not be opened or read
    #[error("Controller error: {0}")]
    Controller(String),

    /// The window could not be created or the event loop failed
    #[error("Window error: {0}")]
    Window(String),
}

/// Result type alias for Pad Overlay
pub type Result<T> = std::result::Result<T, PadOverlayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_not_found_message() {
        let err = PadOverlayError::ControllerNotFound;
        assert_eq!(err.to_string(), "No joystick connected!");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PadOverlayError = io.into();
        assert!(matches!(err, PadOverlayError::Io(_)));
    }
}
