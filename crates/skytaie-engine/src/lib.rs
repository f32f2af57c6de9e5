//! Skytaie engine crate.
//!
//! A small 2D engine: a frame-loop worker drives a [`core::Game`], the game edits a shared
//! [`scene::Registry`] of shapes and sprites, and the window runtime repaints the registry
//! as filled rectangles. Projects are saved to and loaded from JSON files.

pub mod config;
pub mod coords;
pub mod core;
pub mod frame_loop;
pub mod input;
pub mod logging;
pub mod paint;
pub mod persist;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
