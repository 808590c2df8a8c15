use core::f32::consts::{FRAC_PI_2, PI, TAU};

use anyhow::{ensure, Result};
use petal_engine::coords::Vec2;
use petal_engine::paint::{Color, Paint};
use petal_engine::target::RenderTarget;

/// Outline color is the fill color with RGB scaled by this factor.
pub const STROKE_SHADE: f32 = 0.8;

/// One flower: `petal_count` petals arranged evenly around `center`.
///
/// Each petal is the lens between two half circles: an outer arc of
/// `petal_outside_radius` centered `radius` away from the flower center, and
/// an inner arc of `petal_inside_radius` centered `petal_inside_radius` away,
/// both on the petal's ray.
#[derive(Debug, Clone, PartialEq)]
pub struct Flower {
    center: Vec2,
    radius: f32,
    petal_outside_radius: f32,
    petal_inside_radius: f32,
    petal_count: u32,
    color: Color,
}

impl Flower {
    pub fn new(
        center: Vec2,
        radius: f32,
        petal_outside_radius: f32,
        petal_inside_radius: f32,
        petal_count: u32,
        color: Color,
    ) -> Result<Self> {
        ensure!(center.is_finite(), "flower center must be finite, got {center:?}");
        ensure!(
            radius.is_finite() && radius >= 0.0,
            "flower radius must be finite and non-negative, got {radius}"
        );
        ensure!(
            petal_outside_radius.is_finite() && petal_outside_radius > 0.0,
            "petal outside radius must be positive, got {petal_outside_radius}"
        );
        ensure!(
            petal_inside_radius.is_finite() && petal_inside_radius > 0.0,
            "petal inside radius must be positive, got {petal_inside_radius}"
        );
        ensure!(petal_count >= 1, "a flower needs at least one petal");
        ensure!(
            color.is_normalized(),
            "flower color channels must lie in [0, 1], got {color:?}"
        );

        Ok(Self {
            center,
            radius,
            petal_outside_radius,
            petal_inside_radius,
            petal_count,
            color,
        })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn petal_outside_radius(&self) -> f32 {
        self.petal_outside_radius
    }

    #[inline]
    pub fn petal_inside_radius(&self) -> f32 {
        self.petal_inside_radius
    }

    #[inline]
    pub fn petal_count(&self) -> u32 {
        self.petal_count
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn stroke_color(&self) -> Color {
        self.color.scale_rgb(STROKE_SHADE)
    }

    /// Direction of petal `i`, in radians.
    #[inline]
    pub fn petal_angle(&self, i: u32) -> f32 {
        (i as f32 / self.petal_count as f32) * TAU
    }

    pub fn outer_arc_center(&self, i: u32) -> Vec2 {
        self.center + Vec2::from_angle(self.petal_angle(i)) * self.radius
    }

    pub fn inner_arc_center(&self, i: u32) -> Vec2 {
        self.center + Vec2::from_angle(self.petal_angle(i)) * self.petal_inside_radius
    }

    /// Emits one closed sub-path per petal.
    pub fn build_path(&self, target: &mut dyn RenderTarget) {
        for i in 0..self.petal_count {
            let angle = self.petal_angle(i);
            target.new_sub_path();
            target.arc(
                self.outer_arc_center(i),
                self.petal_outside_radius,
                angle + FRAC_PI_2 + PI,
                angle + FRAC_PI_2,
            );
            target.arc(
                self.inner_arc_center(i),
                self.petal_inside_radius,
                angle + FRAC_PI_2,
                angle + FRAC_PI_2 + PI,
            );
            target.close_path();
        }
    }

    /// Fills the petals, then outlines them in a darker shade.
    ///
    /// Painting consumes the path, so it is built once per operation.
    pub fn paint(&self, target: &mut dyn RenderTarget) {
        target.set_source(Paint::Solid(self.color));
        self.build_path(target);
        target.fill();

        target.set_source(Paint::Solid(self.stroke_color()));
        self.build_path(target);
        target.stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_engine::coords::Viewport;
    use petal_engine::target::{render_with, DrawOp, PathSegment, RecordingSurface};

    const EPS: f32 = 1e-3;

    fn sample() -> Flower {
        Flower::new(
            Vec2::new(100.0, 100.0),
            75.0,
            20.65,
            6.2,
            8,
            Color::from_hsva(0.3, 1.0, 1.0, 0.65),
        )
        .unwrap()
    }

    fn with_petals(n: u32) -> Flower {
        Flower::new(Vec2::new(50.0, 60.0), 70.0, 10.0, 3.0, n, Color::rgb(1.0, 0.0, 0.0)).unwrap()
    }

    fn record(draw: impl FnOnce(&mut dyn RenderTarget)) -> Vec<DrawOp> {
        let mut surface = RecordingSurface::new(Viewport::new(640.0, 480.0));
        render_with(&mut surface, draw);
        surface.take_ops()
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    // ── construction ────────────────────────────────────────────────────

    #[test]
    fn rejects_invalid_parameters() {
        let c = Vec2::new(0.0, 0.0);
        let red = Color::rgb(1.0, 0.0, 0.0);
        assert!(Flower::new(c, 70.0, 10.0, 3.0, 0, red).is_err());
        assert!(Flower::new(c, 70.0, 0.0, 3.0, 6, red).is_err());
        assert!(Flower::new(c, 70.0, 10.0, -1.0, 6, red).is_err());
        assert!(Flower::new(c, f32::NAN, 10.0, 3.0, 6, red).is_err());
        assert!(Flower::new(c, 70.0, 10.0, 3.0, 6, Color::new(1.2, 0.0, 0.0, 1.0)).is_err());
        assert!(Flower::new(Vec2::new(f32::INFINITY, 0.0), 70.0, 10.0, 3.0, 6, red).is_err());
    }

    #[test]
    fn stroke_color_darkens_rgb_only() {
        let f = sample();
        let fill = f.color();
        let stroke = f.stroke_color();
        assert!((stroke.r - fill.r * 0.8).abs() < EPS);
        assert!((stroke.g - fill.g * 0.8).abs() < EPS);
        assert!((stroke.b - fill.b * 0.8).abs() < EPS);
        assert_eq!(stroke.a, fill.a);
    }

    // ── path ────────────────────────────────────────────────────────────

    #[test]
    fn one_closed_sub_path_per_petal() {
        for n in [1, 2, 6, 17, 50] {
            let ops = record(|t| {
                with_petals(n).build_path(t);
                t.fill();
            });
            assert_eq!(ops.len(), 1);
            let path = ops[0].path().unwrap();
            assert_eq!(path.sub_path_count(), n as usize);
            assert_eq!(path.closed_sub_path_count(), n as usize);
        }
    }

    #[test]
    fn arc_centers_lie_on_petal_rays() {
        let f = with_petals(12);
        for i in 0..12 {
            let angle = TAU * i as f32 / 12.0;
            let dir = Vec2::new(angle.cos(), angle.sin());
            assert!(close(f.outer_arc_center(i), f.center() + dir * 70.0));
            assert!(close(f.inner_arc_center(i), f.center() + dir * 3.0));
        }
    }

    #[test]
    fn each_petal_is_two_half_circles() {
        let f = with_petals(6);
        let ops = record(|t| {
            f.build_path(t);
            t.fill();
        });
        let path = ops[0].path().unwrap();

        for (i, sub) in path.sub_paths().enumerate() {
            let arcs: Vec<_> = sub
                .iter()
                .filter_map(|s| match s {
                    PathSegment::Arc(a) => Some(*a),
                    _ => None,
                })
                .collect();
            assert_eq!(arcs.len(), 2);

            let angle = f.petal_angle(i as u32);
            let (outer, inner) = (arcs[0], arcs[1]);
            assert!(close(outer.center, f.outer_arc_center(i as u32)));
            assert!((outer.radius - 10.0).abs() < EPS);
            assert!((outer.start_angle - (angle + 1.5 * PI)).abs() < EPS);
            assert!((outer.sweep_angle - PI).abs() < EPS);

            assert!(close(inner.center, f.inner_arc_center(i as u32)));
            assert!((inner.radius - 3.0).abs() < EPS);
            assert!((inner.start_angle - (angle + FRAC_PI_2)).abs() < EPS);
            assert!((inner.sweep_angle - PI).abs() < EPS);
        }
    }

    #[test]
    fn eight_petal_example() {
        let f = sample();
        let ops = record(|t| f.paint(t));
        let path = ops[0].path().unwrap();

        assert_eq!(path.sub_path_count(), 8);
        assert_eq!(path.closed_sub_path_count(), 8);
        assert_eq!(path.arcs().count(), 16);

        for (i, arc) in path.arcs().step_by(2).enumerate() {
            let angle = (i as f32 * 45.0).to_radians();
            let expected = Vec2::new(100.0 + 75.0 * angle.cos(), 100.0 + 75.0 * angle.sin());
            assert!(close(arc.center, expected), "petal {i} at {:?}", arc.center);
            assert!((arc.radius - 20.65).abs() < EPS);
        }
    }

    // ── paint ───────────────────────────────────────────────────────────

    #[test]
    fn paint_is_one_fill_then_one_stroke() {
        let f = sample();
        let ops = record(|t| f.paint(t));
        assert_eq!(ops.len(), 2);

        match (&ops[0], &ops[1]) {
            (DrawOp::Fill { path: fill_path, paint: fill }, DrawOp::Stroke { path: stroke_path, paint: stroke, .. }) => {
                assert_eq!(fill_path, stroke_path);
                assert_eq!(*fill, Paint::Solid(f.color()));
                assert_eq!(*stroke, Paint::Solid(f.stroke_color()));
            }
            other => panic!("unexpected ops {other:?}"),
        }
    }
}
