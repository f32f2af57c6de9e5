use anyhow::Result;

/// Where the frame loop sends its per-iteration repaint request.
///
/// Requests must not block on the repaint itself; the loop moves straight on to
/// `on_update` while the window redraws.
pub trait RepaintSink: Send + 'static {
    fn request_repaint(&self) -> Result<()>;

    /// Called once on the worker thread after the last iteration.
    fn loop_finished(&self) {}
}

/// Sink for headless runs.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoRepaint;

impl RepaintSink for NoRepaint {
    fn request_repaint(&self) -> Result<()> {
        Ok(())
    }
}

/// Adapts a closure into a [`RepaintSink`].
pub struct RepaintFn<F>(pub F);

impl<F> RepaintSink for RepaintFn<F>
where
    F: Fn() -> Result<()> + Send + 'static,
{
    fn request_repaint(&self) -> Result<()> {
        (self.0)()
    }
}
