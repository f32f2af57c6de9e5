//! Time subsystem.
//!
//! One `FrameClock` per frame loop; the loop ticks it once per iteration and hands the
//! resulting `FrameTime` to game hooks.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
