use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use parking_lot::Mutex;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::config::EngineConfig;
use crate::core::{Game, GameCtx};
use crate::frame_loop::{FrameLoop, LoopState, RepaintSink};
use crate::input::Modifiers;
use crate::input::platform::{map_modifiers, translate_key_event};
use crate::paint::Color;
use crate::persist::Project;
use crate::render::{Framebuffer, Renderer};
use crate::scene::{Registry, RegistryListing, RegistryObserver};

/// Messages from the frame-loop worker to the event-loop thread.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Repaint,
    RegistryChanged(RegistryListing),
    LoopFinished,
}

/// Repaint sink backed by the event-loop proxy. Never waits for the redraw.
struct ProxyRepaint(EventLoopProxy<RuntimeEvent>);

impl RepaintSink for ProxyRepaint {
    fn request_repaint(&self) -> Result<()> {
        self.0
            .send_event(RuntimeEvent::Repaint)
            .map_err(|_| anyhow!("event loop closed"))
    }

    fn loop_finished(&self) {
        let _ = self.0.send_event(RuntimeEvent::LoopFinished);
    }
}

/// List-refresh collaborator: forwards registry listings to the window.
struct ListRefresh {
    proxy: EventLoopProxy<RuntimeEvent>,
    gate: RevisionGate,
}

impl RegistryObserver for ListRefresh {
    fn registry_changed(&self, listing: &RegistryListing) {
        self.gate.pass(listing.revision, || {
            let _ = self
                .proxy
                .send_event(RuntimeEvent::RegistryChanged(listing.clone()));
        });
    }
}

/// Lets a listing through only if it is newer than every listing already passed.
///
/// `send` runs while the gate is held, so passed listings are queued in revision order.
#[derive(Default)]
struct RevisionGate(Mutex<u64>);

impl RevisionGate {
    fn pass(&self, revision: u64, send: impl FnOnce()) -> bool {
        let mut last = self.0.lock();
        if revision <= *last {
            return false;
        }
        *last = revision;
        send();
        true
    }
}

/// Entry point for the windowed engine.
pub struct Runtime;

impl Runtime {
    /// Opens the window, starts the frame loop and blocks until the window closes or the
    /// game exits.
    pub fn run<G: Game>(config: EngineConfig, game: G) -> Result<()> {
        Self::run_with_registry(config, game, Registry::new())
    }

    /// Like [`run`](Self::run) but draws from a caller-supplied registry.
    pub fn run_with_registry<G: Game>(config: EngineConfig, game: G, registry: Registry) -> Result<()> {
        let event_loop = EventLoop::<RuntimeEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let proxy = event_loop.create_proxy();
        registry.set_observer(Arc::new(ListRefresh {
            proxy: proxy.clone(),
            gate: RevisionGate::default(),
        }));

        let mut state = AppState::new(config, game, registry.clone(), proxy);
        let result = event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error");

        state.shutdown();
        registry.clear_observer();
        result?;

        state.failure.map_or(Ok(()), Err)
    }
}

struct Presenter {
    window: Arc<Window>,
    // Kept alive for the surface.
    _context: softbuffer::Context<Arc<Window>>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
}

impl Presenter {
    fn new(window: Arc<Window>) -> Result<Self> {
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("failed to create softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("failed to create softbuffer surface: {e}"))?;
        Ok(Self {
            window,
            _context: context,
            surface,
        })
    }
}

struct AppState<G: Game> {
    config: EngineConfig,
    registry: Registry,
    proxy: EventLoopProxy<RuntimeEvent>,

    pending_game: Option<G>,
    frame_loop: FrameLoop<G>,

    presenter: Option<Presenter>,
    framebuffer: Framebuffer,
    renderer: Renderer,

    modifiers: Modifiers,
    failure: Option<anyhow::Error>,
}

impl<G: Game> AppState<G> {
    fn new(config: EngineConfig, game: G, registry: Registry, proxy: EventLoopProxy<RuntimeEvent>) -> Self {
        let renderer = Renderer::new(config.render_style());
        let frame_loop = FrameLoop::new(config.loop_config());
        let framebuffer = Framebuffer::new(0, 0, Color::WHITE);

        Self {
            config,
            registry,
            proxy,
            pending_game: Some(game),
            frame_loop,
            presenter: None,
            framebuffer,
            renderer,
            modifiers: Modifiers::default(),
            failure: None,
        }
    }

    /// Pixels exposed by a resize, and the first frame, start out in this color.
    fn background(&self) -> Color {
        self.config.clear_color.unwrap_or(Color::WHITE)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.shutdown();
        event_loop.exit();
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        self.presenter = Some(Presenter::new(window)?);
        Ok(())
    }

    fn start_loop(&mut self) -> Result<()> {
        let Some(game) = self.pending_game.take() else {
            return Ok(());
        };

        let ctx = GameCtx::new(
            self.registry.clone(),
            Project::new(self.config.project_folder.clone()),
        );
        self.frame_loop
            .start(game, ctx, ProxyRepaint(self.proxy.clone()))
            .context("failed to start frame loop")
    }

    /// Render callback: snapshot the registry, draw into the framebuffer, present.
    fn redraw(&mut self) -> Result<()> {
        let background = self.background();
        let Some(presenter) = self.presenter.as_mut() else {
            return Ok(());
        };

        let size = presenter.window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            // Minimized.
            return Ok(());
        };

        presenter
            .surface
            .resize(w, h)
            .map_err(|e| anyhow!("failed to resize surface: {e}"))?;
        self.framebuffer.resize(w.get(), h.get(), background);

        let snapshot = self.registry.snapshot();
        self.renderer.render(&snapshot, &mut self.framebuffer);

        let mut buffer = presenter
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("failed to acquire surface buffer: {e}"))?;
        buffer.copy_from_slice(self.framebuffer.pixels());

        presenter.window.pre_present_notify();
        buffer
            .present()
            .map_err(|e| anyhow!("failed to present frame: {e}"))
    }

    fn refresh_listing(&self, listing: &RegistryListing) {
        log::debug!("shapes: {:?}", listing.shapes);
        log::debug!("sprites: {:?}", listing.sprites);

        if let Some(presenter) = &self.presenter {
            presenter.window.set_title(&format!(
                "{} ({} shapes, {} sprites)",
                self.config.title,
                listing.shapes.len(),
                listing.sprites.len()
            ));
        }
    }

    fn shutdown(&mut self) {
        if self.frame_loop.state() != LoopState::Running {
            return;
        }
        match self.frame_loop.stop() {
            Ok(_) => log::info!("frame loop stopped"),
            Err(e) => log::error!("frame loop stop failed: {e}"),
        }
    }
}

impl<G: Game> ApplicationHandler<RuntimeEvent> for AppState<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.presenter.is_some() {
            return;
        }

        if let Err(e) = self.open_window(event_loop).and_then(|_| self.start_loop()) {
            self.fail(event_loop, e);
            return;
        }

        if let Some(p) = &self.presenter {
            p.window.request_redraw();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: RuntimeEvent) {
        match event {
            RuntimeEvent::Repaint => {
                if let Some(p) = &self.presenter {
                    p.window.request_redraw();
                }
            }
            RuntimeEvent::RegistryChanged(listing) => self.refresh_listing(&listing),
            RuntimeEvent::LoopFinished => {
                log::info!("game finished; closing window");
                self.shutdown();
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(p) = &self.presenter {
                    p.window.request_redraw();
                }
            }

            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = map_modifiers(m.state());
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = translate_key_event(&event, self.modifiers);
                if !self.frame_loop.send_key(key) {
                    log::debug!("dropped {:?}: frame loop not running", key.key);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    log::error!("redraw failed: {e:#}");
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_drops_listings_older_than_the_last_sent() {
        let gate = RevisionGate::default();
        let mut sent = Vec::new();

        for revision in [1, 3, 2, 3, 5, 4] {
            gate.pass(revision, || sent.push(revision));
        }

        assert_eq!(sent, vec![1, 3, 5]);
    }

    #[test]
    fn gate_keeps_order_across_threads() {
        let gate = Arc::new(RevisionGate::default());
        let sent = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let gate = gate.clone();
                let sent = sent.clone();
                std::thread::spawn(move || {
                    for i in 0..100u64 {
                        let revision = i * 4 + t + 1;
                        gate.pass(revision, || sent.lock().push(revision));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let sent = sent.lock();
        assert!(sent.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(sent.last(), Some(&400));
    }
}
