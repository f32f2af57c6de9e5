use serde::{Deserialize, Serialize};

use crate::coords::{IRect, Vec2};

/// Axis-aligned rectangle placeholder for arbitrary 2D shapes.
///
/// Carries no color, rotation or z-order; the renderer decides how shapes look and the
/// registry's insertion order decides stacking.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape2D {
    #[serde(rename = "Position")]
    pub position: Vec2,
    #[serde(rename = "Scale")]
    pub scale: Vec2,
}

impl Shape2D {
    #[inline]
    pub const fn new(position: Vec2, scale: Vec2) -> Self {
        Self { position, scale }
    }

    /// Screen rectangle covered by this shape.
    #[inline]
    pub fn bounds(&self) -> IRect {
        IRect::from_origin_size(self.position, self.scale)
    }
}
