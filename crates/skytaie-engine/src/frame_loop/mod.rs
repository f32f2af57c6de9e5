//! Frame loop.
//!
//! One worker thread drives a [`Game`]: `on_load` once, then every tick
//! key hooks → `on_draw` → repaint request → `on_update` → sleep.
//! Failures inside an iteration are logged and skipped; only [`FrameLoop::stop`]
//! (or the game asking to exit) ends the loop.

mod repaint;
mod state;
mod worker;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::core::{Game, GameCtx};
use crate::input::KeyEvent;

pub use repaint::{NoRepaint, RepaintFn, RepaintSink};
pub use state::{LoopError, LoopState, LoopStats};

use worker::Worker;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Sleep at the end of every iteration.
    pub tick_interval: Duration,
    pub thread_name: String,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1),
            thread_name: "skytaie-frame-loop".to_string(),
        }
    }
}

/// Handle to the frame-loop worker.
///
/// `NotStarted → Running → Stopped`. A stopped loop cannot be restarted; take the game
/// back from [`stop`](Self::stop) and start a new `FrameLoop` with it.
pub struct FrameLoop<G: Game> {
    config: LoopConfig,
    state: LoopState,
    cancel: Arc<AtomicBool>,
    stats: Arc<LoopStats>,
    keys: Option<Sender<KeyEvent>>,
    worker: Option<JoinHandle<(G, GameCtx)>>,
}

impl<G: Game> FrameLoop<G> {
    pub fn new(config: LoopConfig) -> Self {
        Self {
            config,
            state: LoopState::NotStarted,
            cancel: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(LoopStats::default()),
            keys: None,
            worker: None,
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    /// True once the worker thread has returned, e.g. after the game called
    /// [`GameCtx::exit`]. [`stop`](Self::stop) is still needed to collect the game.
    pub fn worker_finished(&self) -> bool {
        self.worker.as_ref().is_some_and(JoinHandle::is_finished)
    }

    /// Spawns the worker and runs `on_load` on it.
    pub fn start<R: RepaintSink>(&mut self, game: G, ctx: GameCtx, repaint: R) -> Result<(), LoopError> {
        match self.state {
            LoopState::NotStarted => {}
            LoopState::Running => return Err(LoopError::AlreadyStarted),
            LoopState::Stopped => return Err(LoopError::Stopped),
        }

        let (tx, rx) = mpsc::channel();
        let worker = Worker {
            game,
            ctx,
            repaint,
            keys: rx,
            cancel: Arc::clone(&self.cancel),
            stats: Arc::clone(&self.stats),
            tick_interval: self.config.tick_interval,
        };

        let handle = std::thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || worker.run())
            .map_err(LoopError::Spawn)?;

        self.keys = Some(tx);
        self.worker = Some(handle);
        self.state = LoopState::Running;
        Ok(())
    }

    /// Queues a key event for the worker. Returns `false` if the worker is gone.
    pub fn send_key(&self, event: KeyEvent) -> bool {
        match &self.keys {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }

    /// Signals cancellation and blocks until the worker has exited.
    ///
    /// The signal is observed at the top of the next iteration, so at most one more
    /// iteration runs after this is called.
    pub fn stop(&mut self) -> Result<(G, GameCtx), LoopError> {
        match self.state {
            LoopState::Running => {}
            LoopState::NotStarted => return Err(LoopError::NotStarted),
            LoopState::Stopped => return Err(LoopError::Stopped),
        }

        self.cancel.store(true, Ordering::Release);
        self.keys = None;
        self.state = LoopState::Stopped;

        let handle = self.worker.take().ok_or(LoopError::NotStarted)?;
        handle.join().map_err(|_| LoopError::WorkerPanicked)
    }
}

impl<G: Game> Drop for FrameLoop<G> {
    fn drop(&mut self) {
        if self.state == LoopState::Running {
            if let Err(err) = self.stop() {
                log::error!("frame loop did not shut down cleanly: {err}");
            }
        }
    }
}
