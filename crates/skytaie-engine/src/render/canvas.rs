use crate::coords::IRect;
use crate::paint::Color;

/// Drawing surface handed to the render callback.
///
/// Coordinates are integer screen pixels, top-left origin. Implementations decide what
/// happens to rectangles that fall partly or fully outside their bounds.
pub trait Canvas {
    /// Surface size as `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    fn fill_rect(&mut self, color: Color, rect: IRect);

    fn clear(&mut self, color: Color);
}
