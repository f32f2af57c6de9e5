use serde::{Deserialize, Serialize};

/// Straight-alpha sRGB color, one byte per channel.
///
/// The framebuffer stores pixels as `0x00RRGGBB`; alpha only matters while blending a
/// fill onto what is already there.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    u8::MAX
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    /// Packs into the `0x00RRGGBB` layout used by the framebuffer and the window surface.
    #[inline]
    pub const fn to_xrgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Source-over blend of `self` onto an `0x00RRGGBB` destination pixel.
    pub fn blend_over(self, dst: u32) -> u32 {
        if self.is_opaque() {
            return self.to_xrgb();
        }
        if self.a == 0 {
            return dst;
        }

        let a = u32::from(self.a);
        let inv = 255 - a;
        let mix = |src: u8, shift: u32| -> u32 {
            let d = (dst >> shift) & 0xff;
            ((u32::from(src) * a + d * inv + 127) / 255) << shift
        };

        mix(self.r, 16) | mix(self.g, 8) | mix(self.b, 0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
