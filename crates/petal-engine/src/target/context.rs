use crate::coords::{Vec2, Viewport};
use crate::paint::Paint;

use super::{DrawOp, PathBuilder, Surface};

/// Stroke width used until [`Context::set_line_width`] is called.
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Path-construction and painting protocol the garden draws against.
///
/// Angles are radians. Painting operations consume the current path, so a
/// caller that wants to fill and then stroke the same shape rebuilds it.
pub trait RenderTarget {
    /// Extent of the underlying surface in logical pixels.
    fn size(&self) -> Viewport;

    /// Forgets the current point so the next arc starts a fresh sub-path.
    fn new_sub_path(&mut self);

    /// Adds a circular arc swept from `start_angle` towards `end_angle` in the
    /// increasing-angle direction.
    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32);

    /// Closes the current sub-path.
    fn close_path(&mut self);

    fn set_source(&mut self, paint: Paint);

    /// Fills the current path (non-zero winding) and clears it.
    fn fill(&mut self);

    /// Strokes the current path and clears it.
    fn stroke(&mut self);

    /// Covers the whole target with the current source.
    fn paint(&mut self);
}

/// Drawing context bound to one surface for the duration of a render pass.
///
/// Contexts are cheap; create one per pass, the way the live view does for
/// every incremental update.
pub struct Context<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
    path: PathBuilder,
    source: Paint,
    line_width: f32,
}

impl<'s, S: Surface + ?Sized> Context<'s, S> {
    pub fn new(surface: &'s mut S) -> Self {
        Self {
            surface,
            path: PathBuilder::new(),
            source: Paint::default(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    #[inline]
    pub fn source(&self) -> &Paint {
        &self.source
    }

    #[inline]
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width >= 0.0 {
            self.line_width = width;
        }
    }

    /// The path accumulated since the last painting operation.
    #[inline]
    pub fn path(&self) -> &PathBuilder {
        &self.path
    }
}

impl<S: Surface + ?Sized> RenderTarget for Context<'_, S> {
    fn size(&self) -> Viewport {
        self.surface.size()
    }

    fn new_sub_path(&mut self) {
        self.path.new_sub_path();
    }

    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        self.path.arc(center, radius, start_angle, end_angle);
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn set_source(&mut self, paint: Paint) {
        self.source = paint;
    }

    fn fill(&mut self) {
        let path = self.path.take();
        if path.is_empty() {
            return;
        }
        self.surface.draw(DrawOp::Fill {
            path,
            paint: self.source.clone(),
        });
    }

    fn stroke(&mut self) {
        let path = self.path.take();
        if path.is_empty() {
            return;
        }
        self.surface.draw(DrawOp::Stroke {
            path,
            paint: self.source.clone(),
            line_width: self.line_width,
        });
    }

    fn paint(&mut self) {
        self.surface.draw(DrawOp::Paint {
            paint: self.source.clone(),
        });
    }
}

/// Runs `draw` against a fresh [`Context`] over `surface`.
///
/// This is the single entry point used for both live rendering and export.
pub fn render_with<S, F>(surface: &mut S, draw: F)
where
    S: Surface + ?Sized,
    F: FnOnce(&mut dyn RenderTarget),
{
    let mut ctx = Context::new(surface);
    draw(&mut ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::target::RecordingSurface;

    fn surface() -> RecordingSurface {
        RecordingSurface::new(Viewport::new(100.0, 100.0))
    }

    #[test]
    fn fill_consumes_the_path() {
        let mut s = surface();
        {
            let mut ctx = Context::new(&mut s);
            ctx.arc(Vec2::new(50.0, 50.0), 10.0, 0.0, 1.0);
            ctx.fill();
            ctx.stroke();
        }
        // The stroke found an empty path and emitted nothing.
        assert_eq!(s.ops().len(), 1);
        assert!(matches!(s.ops()[0], DrawOp::Fill { .. }));
    }

    #[test]
    fn ops_capture_source_at_call_time() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let mut s = surface();
        {
            let mut ctx = Context::new(&mut s);
            ctx.set_source(Paint::Solid(red));
            ctx.arc(Vec2::zero(), 5.0, 0.0, 1.0);
            ctx.fill();
            ctx.set_source(Paint::Solid(Color::white()));
        }
        assert_eq!(s.ops()[0].paint(), &Paint::Solid(red));
    }

    #[test]
    fn stroke_uses_default_line_width() {
        let mut s = surface();
        render_with(&mut s, |t| {
            t.arc(Vec2::zero(), 5.0, 0.0, 1.0);
            t.stroke();
        });
        match &s.ops()[0] {
            DrawOp::Stroke { line_width, .. } => assert_eq!(*line_width, DEFAULT_LINE_WIDTH),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn paint_does_not_need_a_path() {
        let mut s = surface();
        render_with(&mut s, |t| t.paint());
        assert_eq!(s.ops(), &[DrawOp::Paint { paint: Paint::default() }]);
    }

    #[test]
    fn size_reports_surface_extent() {
        let mut s = surface();
        let ctx = Context::new(&mut s);
        assert_eq!(ctx.size(), Viewport::new(100.0, 100.0));
    }
}
