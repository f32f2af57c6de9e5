//! Game-facing contracts.
//!
//! `Game` is the extension point a consumer implements; `GameCtx` is the explicit
//! context passed into every hook in place of global engine state.

mod ctx;
mod game;

pub use ctx::GameCtx;
pub use game::Game;
