//! Renderable registry.
//!
//! Responsibilities:
//! - own the shape and sprite sequences in draw order
//! - hand out consistent snapshots to the renderer
//! - notify a list view when entries are added or removed

mod registry;
mod shape;
mod sprite;

pub use registry::{Registry, RegistryListing, RegistryObserver, RegistryState};
pub use shape::Shape2D;
pub use sprite::Sprite2D;
