use crate::input::InputState;
use crate::persist::Project;
use crate::scene::Registry;
use crate::time::FrameTime;

/// Everything a [`Game`](super::Game) hook can reach.
///
/// Owned by the frame-loop worker. The registry handle is shared with the renderer;
/// the rest is private to the worker.
#[derive(Debug)]
pub struct GameCtx {
    pub registry: Registry,
    pub project: Project,
    pub input: InputState,
    pub time: FrameTime,
    exit_requested: bool,
}

impl GameCtx {
    pub fn new(registry: Registry, project: Project) -> Self {
        Self {
            registry,
            project,
            input: InputState::default(),
            time: FrameTime::default(),
            exit_requested: false,
        }
    }

    /// Asks the frame loop to finish after the current iteration.
    pub fn exit(&mut self) {
        self.exit_requested = true;
    }

    #[inline]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
