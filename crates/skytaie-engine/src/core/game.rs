use anyhow::Result;

use crate::input::KeyEvent;

use super::GameCtx;

/// Per-game behavior plugged into the frame loop.
///
/// All hooks run on the frame-loop worker thread. An `Err` or a panic from any hook is
/// logged and the loop carries on with the next iteration.
pub trait Game: Send + 'static {
    /// Called once, before the first iteration.
    fn on_load(&mut self, ctx: &mut GameCtx) -> Result<()>;

    /// Called every iteration, before the repaint request.
    fn on_draw(&mut self, ctx: &mut GameCtx) -> Result<()>;

    /// Called every iteration, after the repaint request.
    fn on_update(&mut self, ctx: &mut GameCtx) -> Result<()>;

    fn on_key_down(&mut self, ctx: &mut GameCtx, event: &KeyEvent) -> Result<()> {
        let _ = (ctx, event);
        Ok(())
    }

    fn on_key_up(&mut self, ctx: &mut GameCtx, event: &KeyEvent) -> Result<()> {
        let _ = (ctx, event);
        Ok(())
    }
}
