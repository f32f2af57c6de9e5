use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::Result;

use crate::core::{Game, GameCtx};
use crate::input::{KeyEvent, KeyState};
use crate::time::FrameClock;

use super::{LoopStats, RepaintSink};

pub(super) struct Worker<G, R> {
    pub game: G,
    pub ctx: GameCtx,
    pub repaint: R,
    pub keys: Receiver<KeyEvent>,
    pub cancel: Arc<AtomicBool>,
    pub stats: Arc<LoopStats>,
    pub tick_interval: Duration,
}

impl<G: Game, R: RepaintSink> Worker<G, R> {
    /// Worker thread body. Hands the game and its context back when cancelled.
    pub fn run(mut self) -> (G, GameCtx) {
        log::info!("frame loop started");

        let loaded = guarded(|| self.game.on_load(&mut self.ctx));
        self.report("on_load", loaded);

        let mut clock = FrameClock::new();

        while !self.cancel.load(Ordering::Acquire) {
            self.ctx.time = clock.tick();

            let outcome = guarded(|| self.iterate());
            self.report("frame", outcome);
            self.stats.record_iteration();

            if self.ctx.exit_requested() {
                log::info!("game requested exit at frame {}", self.ctx.time.frame_index);
                break;
            }

            std::thread::sleep(self.tick_interval);
        }

        self.repaint.loop_finished();
        log::info!("frame loop finished after {} iterations", self.stats.iterations());
        (self.game, self.ctx)
    }

    fn iterate(&mut self) -> Result<()> {
        while let Ok(event) = self.keys.try_recv() {
            self.ctx.input.apply(&event);
            match event.state {
                KeyState::Pressed => self.game.on_key_down(&mut self.ctx, &event)?,
                KeyState::Released => self.game.on_key_up(&mut self.ctx, &event)?,
            }
        }

        self.game.on_draw(&mut self.ctx)?;
        self.repaint.request_repaint()?;
        self.game.on_update(&mut self.ctx)?;
        Ok(())
    }

    fn report(&self, stage: &str, outcome: Outcome) {
        let frame = self.ctx.time.frame_index;
        match outcome {
            Outcome::Ok => {}
            Outcome::Failed(err) => {
                self.stats.record_failure();
                log::error!("{stage} failed (frame {frame}): {err:#}");
            }
            Outcome::Panicked(msg) => {
                self.stats.record_failure();
                log::error!("{stage} panicked (frame {frame}): {msg}");
            }
        }
    }
}

enum Outcome {
    Ok,
    Failed(anyhow::Error),
    Panicked(String),
}

fn guarded(f: impl FnOnce() -> Result<()>) -> Outcome {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => Outcome::Ok,
        Ok(Err(err)) => Outcome::Failed(err),
        Err(payload) => Outcome::Panicked(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
