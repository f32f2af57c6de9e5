//! Paint model for the software renderer.
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
