//! Coordinate types shared by the registry, the renderer and persistence.
//!
//! Canonical space:
//! - Screen pixels
//! - Origin top-left
//! - +X right, +Y down

mod rect;
mod vec2;

pub use rect::IRect;
pub use vec2::Vec2;
