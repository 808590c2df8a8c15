use petal_engine::coords::Viewport;
use petal_engine::paint::{Color, Paint, RadialGradient};
use petal_engine::target::{render_with, RenderTarget, Surface};

use crate::flower::Flower;

/// Radial backdrop centered on the viewport.
///
/// `inner` sits at the center; `outer` is reached one viewport width away.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Background {
    pub inner: Color,
    pub outer: Color,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            inner: Color::white(),
            outer: Color::rgb(0.6, 0.6, 0.6),
        }
    }
}

impl Background {
    pub fn gradient(&self, viewport: Viewport) -> RadialGradient {
        let c = viewport.center();
        RadialGradient::new(c, 0.0, c, viewport.width)
            .with_stop(0.0, self.inner)
            .with_stop(1.0, self.outer)
    }
}

/// Flowers in draw order over a background.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    flowers: Vec<Flower>,
    background: Background,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flowers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty()
    }

    /// Adds `flower` on top and returns it.
    pub fn push(&mut self, flower: Flower) -> &Flower {
        self.flowers.push(flower);
        &self.flowers[self.flowers.len() - 1]
    }

    /// Removes every flower; the background stays.
    pub fn clear(&mut self) {
        self.flowers.clear();
    }

    /// Paints the background over the whole target, then every flower.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        let gradient = self.background.gradient(target.size());
        target.set_source(Paint::RadialGradient(gradient));
        target.paint();

        for flower in &self.flowers {
            flower.paint(target);
        }
    }
}

/// Renders `scene` onto any surface: the live raster, a document, or a recorder.
pub fn render_scene<S: Surface + ?Sized>(scene: &Scene, surface: &mut S) {
    render_with(surface, |target| scene.render(target));
}
