//! # Layout Module
//!
//! Screen-space description of a controller: the coordinate table of control
//! positions and the profile that ties hardware indices to those names.

pub mod coordinates;
pub mod profile;

pub use coordinates::{CoordinateTable, ScreenPoint};
pub use profile::{ControllerProfile, StickLayout};
