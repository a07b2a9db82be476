//! # Pad Overlay Library
//!
//! Visualize, calibrate and rumble a game controller over a picture of it.
//!
//! This library provides the pieces shared by the three tools:
//! reading controller state through evdev, composing the overlay drawn on the
//! controller image, the click-by-click calibration workflow, force-feedback
//! effects, and the eframe windows that tie them together.

pub mod calibration;
pub mod config;
pub mod controller;
pub mod error;
pub mod haptic;
pub mod inspector;
pub mod layout;
pub mod logging;
pub mod overlay;
pub mod ui;
