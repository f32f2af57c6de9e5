//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and window, presents the software framebuffer through
//! `softbuffer`, and bridges the frame-loop worker to the event loop.

mod runtime;

pub use runtime::{Runtime, RuntimeEvent};
