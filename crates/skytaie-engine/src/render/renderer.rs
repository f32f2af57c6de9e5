use crate::paint::Color;
use crate::scene::RegistryState;

use super::Canvas;

/// Colors used by [`Renderer`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderStyle {
    pub shape_color: Color,
    pub sprite_color: Color,
    /// Fill applied before drawing. `None` keeps whatever the last frame left.
    pub clear_color: Option<Color>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            shape_color: Color::RED,
            sprite_color: Color::BLUE,
            clear_color: None,
        }
    }
}

/// Render callback: draws every registry entry as a filled rectangle.
///
/// Shapes first, then sprites, each in insertion order, so sprites cover shapes and
/// later entries cover earlier ones. No clipping here; that is the canvas' job.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    style: RenderStyle,
}

impl Renderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    #[inline]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn render(&self, state: &RegistryState, canvas: &mut dyn Canvas) {
        if let Some(bg) = self.style.clear_color {
            canvas.clear(bg);
        }

        for shape in &state.shapes {
            canvas.fill_rect(self.style.shape_color, shape.bounds());
        }

        for sprite in &state.sprites {
            canvas.fill_rect(self.style.sprite_color, sprite.bounds());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{IRect, Vec2};
    use crate::render::Framebuffer;
    use crate::scene::{Shape2D, Sprite2D};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Color, IRect)>,
        clears: usize,
    }

    impl Canvas for Recorder {
        fn size(&self) -> (u32, u32) {
            (100, 100)
        }
        fn fill_rect(&mut self, color: Color, rect: IRect) {
            self.calls.push((color, rect));
        }
        fn clear(&mut self, _color: Color) {
            self.clears += 1;
        }
    }

    fn state() -> RegistryState {
        RegistryState {
            shapes: vec![
                Shape2D::new(Vec2::new(1.5, 2.0), Vec2::new(10.0, 5.9)),
                Shape2D::new(Vec2::new(0.0, 0.0), Vec2::new(3.0, 3.0)),
            ],
            sprites: vec![Sprite2D::new(Vec2::new(4.0, 4.0), Vec2::new(2.0, 2.0))],
        }
    }

    #[test]
    fn draws_shapes_then_sprites_in_order() {
        let mut rec = Recorder::default();
        Renderer::default().render(&state(), &mut rec);

        assert_eq!(
            rec.calls,
            vec![
                (Color::RED, IRect::new(1, 2, 10, 5)),
                (Color::RED, IRect::new(0, 0, 3, 3)),
                (Color::BLUE, IRect::new(4, 4, 2, 2)),
            ]
        );
        assert_eq!(rec.clears, 0);
    }

    #[test]
    fn clears_only_when_configured() {
        let mut rec = Recorder::default();
        let style = RenderStyle { clear_color: Some(Color::WHITE), ..RenderStyle::default() };
        Renderer::new(style).render(&RegistryState::default(), &mut rec);
        assert_eq!(rec.clears, 1);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn sprite_covers_shape() {
        let mut fb = Framebuffer::new(8, 8, Color::WHITE);
        let mut st = RegistryState::default();
        st.shapes.push(Shape2D::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0)));
        st.sprites.push(Sprite2D::new(Vec2::new(2.0, 2.0), Vec2::new(4.0, 4.0)));

        Renderer::default().render(&st, &mut fb);

        assert_eq!(fb.pixel(1, 1), Some(Color::RED.to_xrgb()));
        assert_eq!(fb.pixel(3, 3), Some(Color::BLUE.to_xrgb()));
        assert_eq!(fb.pixel(7, 7), Some(Color::WHITE.to_xrgb()));
    }

    #[test]
    fn previous_frame_leaves_trails() {
        let mut fb = Framebuffer::new(8, 8, Color::WHITE);
        let renderer = Renderer::default();

        let mut st = RegistryState::default();
        st.shapes.push(Shape2D::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0)));
        renderer.render(&st, &mut fb);

        st.shapes[0].position = Vec2::new(5.0, 5.0);
        renderer.render(&st, &mut fb);

        assert_eq!(fb.pixel(0, 0), Some(Color::RED.to_xrgb()));
        assert_eq!(fb.pixel(5, 5), Some(Color::RED.to_xrgb()));
    }

    #[test]
    fn clear_erases_trails() {
        let mut fb = Framebuffer::new(8, 8, Color::WHITE);
        let renderer = Renderer::new(RenderStyle {
            clear_color: Some(Color::WHITE),
            ..RenderStyle::default()
        });

        let mut st = RegistryState::default();
        st.shapes.push(Shape2D::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0)));
        renderer.render(&st, &mut fb);

        st.shapes[0].position = Vec2::new(5.0, 5.0);
        renderer.render(&st, &mut fb);

        assert_eq!(fb.pixel(0, 0), Some(Color::WHITE.to_xrgb()));
        assert_eq!(fb.pixel(5, 5), Some(Color::RED.to_xrgb()));
    }
}
