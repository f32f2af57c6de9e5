use super::Vec2;

/// Axis-aligned rectangle in integer screen pixels (top-left origin).
///
/// Width or height may be zero or negative; such rectangles cover no pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct IRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl IRect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds a rect from a float origin and size.
    ///
    /// Each component truncates toward zero; out-of-range values saturate.
    #[inline]
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            x: origin.x as i32,
            y: origin.y as i32,
            w: size.x as i32,
            h: size.y as i32,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Intersects with `[0, width) x [0, height)`.
    ///
    /// Returns `(x0, y0, x1, y1)` as exclusive-end pixel bounds, or `None` when nothing
    /// of the rect is visible.
    pub fn clip_to(self, width: u32, height: u32) -> Option<(usize, usize, usize, usize)> {
        if self.is_empty() {
            return None;
        }

        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.w)).min(i64::from(width));
        let y1 = (i64::from(self.y) + i64::from(self.h)).min(i64::from(height));

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}
