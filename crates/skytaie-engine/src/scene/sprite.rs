use serde::{Deserialize, Serialize};

use crate::coords::{IRect, Vec2};

/// Sprite placeholder.
///
/// Structurally a rectangle today; kept as its own type so image and animation data can
/// be attached without touching [`Shape2D`](super::Shape2D).
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprite2D {
    #[serde(rename = "PlayPosition")]
    pub play_position: Vec2,
    #[serde(rename = "Scale")]
    pub scale: Vec2,
}

impl Sprite2D {
    #[inline]
    pub const fn new(play_position: Vec2, scale: Vec2) -> Self {
        Self { play_position, scale }
    }

    #[inline]
    pub fn bounds(&self) -> IRect {
        IRect::from_origin_size(self.play_position, self.scale)
    }
}
