use crate::coords::IRect;
use crate::paint::Color;

use super::Canvas;

/// CPU pixel buffer, row-major, one `0x00RRGGBB` word per pixel.
///
/// Contents persist between frames: nothing is erased unless [`Canvas::clear`] is called.
/// Fills are clipped to the buffer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background.to_xrgb(); pixel_count(width, height)],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Changes the buffer size, keeping the overlapping top-left region.
    ///
    /// Newly exposed pixels take `background`.
    pub fn resize(&mut self, width: u32, height: u32, background: Color) {
        if width == self.width && height == self.height {
            return;
        }

        let mut next = vec![background.to_xrgb(); pixel_count(width, height)];
        let keep_w = self.width.min(width) as usize;
        let keep_h = self.height.min(height) as usize;

        for row in 0..keep_h {
            let src = row * self.width as usize;
            let dst = row * width as usize;
            next[dst..dst + keep_w].copy_from_slice(&self.pixels[src..src + keep_w]);
        }

        self.width = width;
        self.height = height;
        self.pixels = next;
    }
}

impl Canvas for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, color: Color, rect: IRect) {
        let Some((x0, y0, x1, y1)) = rect.clip_to(self.width, self.height) else {
            return;
        };

        let stride = self.width as usize;
        for y in y0..y1 {
            let row = &mut self.pixels[y * stride + x0..y * stride + x1];
            if color.is_opaque() {
                row.fill(color.to_xrgb());
            } else {
                for px in row {
                    *px = color.blend_over(*px);
                }
            }
        }
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_xrgb());
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_clipped() {
        let mut fb = Framebuffer::new(4, 4, Color::WHITE);
        fb.fill_rect(Color::RED, IRect::new(-2, 2, 4, 10));

        assert_eq!(fb.pixel(0, 2), Some(Color::RED.to_xrgb()));
        assert_eq!(fb.pixel(1, 3), Some(Color::RED.to_xrgb()));
        assert_eq!(fb.pixel(2, 2), Some(Color::WHITE.to_xrgb()));
        assert_eq!(fb.pixel(0, 1), Some(Color::WHITE.to_xrgb()));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn empty_rects_draw_nothing() {
        let mut fb = Framebuffer::new(4, 4, Color::WHITE);
        fb.fill_rect(Color::RED, IRect::new(0, 0, 0, 4));
        fb.fill_rect(Color::RED, IRect::new(3, 3, -2, -2));
        assert!(fb.pixels().iter().all(|&p| p == Color::WHITE.to_xrgb()));
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut fb = Framebuffer::new(2, 2, Color::BLACK);
        fb.fill_rect(Color::RED, IRect::new(1, 1, 1, 1));

        fb.resize(3, 3, Color::WHITE);
        assert_eq!(fb.pixel(1, 1), Some(Color::RED.to_xrgb()));
        assert_eq!(fb.pixel(0, 0), Some(Color::BLACK.to_xrgb()));
        assert_eq!(fb.pixel(2, 2), Some(Color::WHITE.to_xrgb()));

        fb.resize(1, 1, Color::WHITE);
        assert_eq!(fb.pixels(), &[Color::BLACK.to_xrgb()]);
    }

    #[test]
    fn zero_sized_buffer_accepts_draws() {
        let mut fb = Framebuffer::new(0, 0, Color::WHITE);
        fb.fill_rect(Color::RED, IRect::new(0, 0, 10, 10));
        assert!(fb.pixels().is_empty());
    }
}
