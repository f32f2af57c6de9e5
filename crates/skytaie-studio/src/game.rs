use std::path::PathBuf;

use anyhow::{Context, Result};

use skytaie_engine::coords::Vec2;
use skytaie_engine::core::{Game, GameCtx};
use skytaie_engine::input::{Key, KeyEvent};
use skytaie_engine::scene::{Shape2D, Sprite2D};

const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 32.0);
const STAMP_SIZE: Vec2 = Vec2::new(12.0, 12.0);
/// Pixels per second.
const PLAYER_SPEED: f32 = 240.0;

/// Demo game: steer a blue sprite, stamp red shapes, save and load the project.
///
/// Controls:
/// - arrows / WASD: move
/// - Space: stamp a shape at the player
/// - Backspace: remove the last stamp
/// - Ctrl+S / Ctrl+L: save to / load from the project folder
/// - Escape: quit
pub struct StudioGame {
    save_root: PathBuf,
    player: Sprite2D,
    stamps: Vec<Shape2D>,
    frames_drawn: u64,
}

impl StudioGame {
    pub fn new(save_root: PathBuf) -> Self {
        Self {
            save_root,
            player: Sprite2D::new(Vec2::new(96.0, 96.0), PLAYER_SIZE),
            stamps: Vec::new(),
            frames_drawn: 0,
        }
    }

    fn stamp(&mut self, ctx: &mut GameCtx) {
        let centre = self.player.play_position + (PLAYER_SIZE - STAMP_SIZE) / 2.0;
        let shape = Shape2D::new(centre, STAMP_SIZE);
        ctx.registry.register_shape(shape);
        self.stamps.push(shape);
    }

    fn unstamp(&mut self, ctx: &mut GameCtx) {
        if let Some(last) = self.stamps.pop() {
            ctx.registry.unregister_shape(&last);
        }
    }

    fn save(&self, ctx: &mut GameCtx) -> Result<()> {
        let folder = ctx
            .project
            .save(&ctx.registry, &self.save_root)
            .context("save failed")?;
        log::info!("project saved to {}", folder.display());
        Ok(())
    }

    fn load(&mut self, ctx: &mut GameCtx) -> Result<()> {
        let folder = ctx.project.save_folder(&self.save_root);
        let report = ctx.project.load(&ctx.registry, &folder).context("load failed")?;

        // Re-sync local handles with what is now in the registry.
        let state = ctx.registry.snapshot();
        self.stamps = state.shapes.clone();
        if let Some(first) = state.sprites.first() {
            self.player = *first;
        } else {
            ctx.registry.register_sprite(self.player);
        }

        log::info!("project loaded: {report:?}");
        Ok(())
    }
}

impl Game for StudioGame {
    fn on_load(&mut self, ctx: &mut GameCtx) -> Result<()> {
        ctx.registry.register_sprite(self.player);
        log::info!("studio ready; project root {}", self.save_root.display());
        Ok(())
    }

    fn on_draw(&mut self, ctx: &mut GameCtx) -> Result<()> {
        self.frames_drawn += 1;
        if ctx.time.frame_index > 0 && ctx.time.frame_index % 5000 == 0 {
            log::debug!(
                "{} frames in {:.1}s, {} entries",
                self.frames_drawn,
                ctx.time.elapsed,
                ctx.registry.len()
            );
        }
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut GameCtx) -> Result<()> {
        let dx = ctx.input.axis(Key::ArrowLeft, Key::ArrowRight) + ctx.input.axis(Key::A, Key::D);
        let dy = ctx.input.axis(Key::ArrowUp, Key::ArrowDown) + ctx.input.axis(Key::W, Key::S);
        if dx == 0.0 && dy == 0.0 {
            return Ok(());
        }

        let old = self.player;
        let step = Vec2::new(dx, dy) * (PLAYER_SPEED * ctx.time.dt);
        self.player.play_position = self.player.play_position + step;
        let moved = self.player;

        ctx.registry.edit(|state| {
            if let Some(slot) = state.sprites.iter_mut().find(|s| **s == old) {
                *slot = moved;
            }
        });
        Ok(())
    }

    fn on_key_down(&mut self, ctx: &mut GameCtx, event: &KeyEvent) -> Result<()> {
        if event.repeat {
            return Ok(());
        }

        match event.key {
            Key::Space => self.stamp(ctx),
            Key::Backspace | Key::Delete => self.unstamp(ctx),
            Key::S if event.modifiers.ctrl => self.save(ctx)?,
            Key::L if event.modifiers.ctrl => self.load(ctx)?,
            Key::Escape => ctx.exit(),
            _ => {}
        }
        Ok(())
    }
}
