//! Software rendering.
//!
//! The render callback reads a registry snapshot and issues integer-rect fills against a
//! `Canvas`. The window runtime backs the canvas with a persistent `Framebuffer`.
//!
//! Convention:
//! - screen pixels, top-left origin, +Y down
//! - fills are opaque unless the color says otherwise

mod canvas;
mod framebuffer;
mod renderer;

pub use canvas::Canvas;
pub use framebuffer::Framebuffer;
pub use renderer::{RenderStyle, Renderer};
