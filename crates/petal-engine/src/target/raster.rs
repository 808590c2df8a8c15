use anyhow::{Context as _, Result};
use kurbo::PathEl;

use crate::coords::Viewport;
use crate::paint::{Color, Paint, RadialGradient};

use super::{DrawOp, Path, Surface};

/// Fixed-size RGBA8 pixel surface backed by a `tiny-skia` pixmap.
///
/// Pixels are stored premultiplied, row-major, top-left origin; this is the
/// layout the GPU bridge uploads as-is.
pub struct RasterSurface {
    pixmap: tiny_skia::Pixmap,
}

impl RasterSurface {
    /// Allocates a transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = tiny_skia::Pixmap::new(width, height)
            .with_context(|| format!("cannot allocate a {width}x{height} raster surface"))?;
        Ok(Self { pixmap })
    }

    /// Allocates a surface covering `viewport`, rounded to whole pixels.
    pub fn for_viewport(viewport: Viewport) -> Result<Self> {
        let (w, h) = viewport.pixel_size();
        Self::new(w, h)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Premultiplied RGBA8 bytes, `width * height * 4` long.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight-alpha RGBA8 value of one pixel, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Fills every pixel with `color`, replacing what was there.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.into());
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let Some(sk_path) = to_skia_path(path) else { return };
        let Some(sk_paint) = to_skia_paint(paint) else { return };
        self.pixmap.fill_path(
            &sk_path,
            &sk_paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, line_width: f32) {
        let Some(sk_path) = to_skia_path(path) else { return };
        let Some(sk_paint) = to_skia_paint(paint) else { return };
        let stroke = tiny_skia::Stroke {
            width: line_width,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &sk_path,
            &sk_paint,
            &stroke,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    fn paint_all(&mut self, paint: &Paint) {
        let Some(sk_paint) = to_skia_paint(paint) else { return };
        let Some(rect) =
            tiny_skia::Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32)
        else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &sk_paint, tiny_skia::Transform::identity(), None);
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Viewport {
        Viewport::new(self.width() as f32, self.height() as f32)
    }

    fn draw(&mut self, op: DrawOp) {
        match &op {
            DrawOp::Fill { path, paint } => self.fill_path(path, paint),
            DrawOp::Stroke {
                path,
                paint,
                line_width,
            } => self.stroke_path(path, paint, *line_width),
            DrawOp::Paint { paint } => self.paint_all(paint),
        }
    }
}

fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in path.to_bez_path().elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn to_skia_paint(paint: &Paint) -> Option<tiny_skia::Paint<'static>> {
    let mut sk = tiny_skia::Paint {
        anti_alias: true,
        ..Default::default()
    };
    match paint {
        Paint::Solid(c) => sk.set_color((*c).into()),
        Paint::RadialGradient(g) => sk.shader = radial_shader(g)?,
    }
    Some(sk)
}

fn radial_shader(g: &RadialGradient) -> Option<tiny_skia::Shader<'static>> {
    if !g.is_valid() {
        log::debug!("skipping invalid radial gradient");
        return None;
    }
    if g.inner_radius > 0.0 {
        // tiny-skia's two-point gradient starts from a point.
        log::debug!("raster radial gradient ignores inner radius {}", g.inner_radius);
    }

    let stops = g
        .sorted_stops()
        .into_iter()
        .map(|s| tiny_skia::GradientStop::new(s.t, s.color.into()))
        .collect();

    tiny_skia::RadialGradient::new(
        tiny_skia::Point::from_xy(g.inner_center.x, g.inner_center.y),
        tiny_skia::Point::from_xy(g.outer_center.x, g.outer_center.y),
        g.outer_radius,
        stops,
        tiny_skia::SpreadMode::Pad,
        tiny_skia::Transform::identity(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::target::{render_with, RenderTarget};

    #[test]
    fn new_surface_is_transparent() {
        let s = RasterSurface::new(4, 3).unwrap();
        assert_eq!(s.data().len(), 4 * 3 * 4);
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(s.pixel(4, 0), None);
    }

    #[test]
    fn zero_size_is_an_error() {
        assert!(RasterSurface::new(0, 10).is_err());
    }

    #[test]
    fn solid_paint_covers_everything() {
        let mut s = RasterSurface::new(8, 8).unwrap();
        render_with(&mut s, |t| {
            t.set_source(Paint::Solid(Color::rgb(0.0, 0.0, 1.0)));
            t.paint();
        });
        assert_eq!(s.pixel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(s.pixel(7, 7), Some([0, 0, 255, 255]));
    }

    #[test]
    fn radial_gradient_runs_from_inner_to_outer_color() {
        let mut s = RasterSurface::new(64, 64).unwrap();
        let c = Vec2::new(32.0, 32.0);
        let g = RadialGradient::new(c, 0.0, c, 64.0)
            .with_stop(0.0, Color::white())
            .with_stop(1.0, Color::rgb(0.6, 0.6, 0.6));
        render_with(&mut s, |t| {
            t.set_source(Paint::RadialGradient(g));
            t.paint();
        });
        let center = s.pixel(32, 32).unwrap();
        let corner = s.pixel(0, 0).unwrap();
        assert!(center[0] > 250);
        assert!(corner[0] < center[0]);
        assert!(corner[0] > 153);
        assert_eq!(corner[3], 255);
    }

    #[test]
    fn filled_arc_lands_inside_circle_only() {
        let mut s = RasterSurface::new(40, 40).unwrap();
        render_with(&mut s, |t| {
            t.set_source(Paint::Solid(Color::rgb(1.0, 0.0, 0.0)));
            t.arc(Vec2::new(20.0, 20.0), 10.0, 0.0, core::f32::consts::TAU);
            t.close_path();
            t.fill();
        });
        assert_eq!(s.pixel(20, 20), Some([255, 0, 0, 255]));
        assert_eq!(s.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn clear_replaces_pixels() {
        let mut s = RasterSurface::new(2, 2).unwrap();
        s.clear(Color::white());
        assert_eq!(s.pixel(1, 1), Some([255, 255, 255, 255]));
    }
}
