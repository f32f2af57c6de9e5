//! Project persistence.
//!
//! A project folder holds `shapes.json` and `sprites.json`: pretty-printed JSON arrays,
//! no schema version.

mod error;
mod project;

pub use error::PersistError;
pub use project::{LoadReport, Project, SHAPES_FILE, SPRITES_FILE};
