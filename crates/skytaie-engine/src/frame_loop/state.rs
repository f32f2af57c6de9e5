use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// Lifecycle of a [`FrameLoop`](super::FrameLoop).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    NotStarted,
    Running,
    Stopped,
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("frame loop is already running")]
    AlreadyStarted,
    #[error("frame loop was never started")]
    NotStarted,
    #[error("frame loop has stopped; build a new one to restart")]
    Stopped,
    #[error("failed to spawn frame loop thread")]
    Spawn(#[source] std::io::Error),
    #[error("frame loop worker panicked outside a guarded hook")]
    WorkerPanicked,
}

/// Counters updated by the worker, readable from any thread.
#[derive(Debug, Default)]
pub struct LoopStats {
    iterations: AtomicU64,
    failures: AtomicU64,
}

impl LoopStats {
    /// Iterations completed, failed ones included.
    pub fn iterations(&self) -> u64 {
        self.iterations.load(Ordering::Acquire)
    }

    /// Hook errors and panics caught, `on_load` included.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Acquire)
    }

    pub(super) fn record_iteration(&self) {
        self.iterations.fetch_add(1, Ordering::AcqRel);
    }

    pub(super) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::AcqRel);
    }
}
