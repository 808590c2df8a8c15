use core::f32::consts::TAU;

use kurbo::{BezPath, PathEl};

use crate::coords::Vec2;

/// Flattening tolerance (logical px) when arcs are expanded to cubic Béziers.
pub const ARC_TOLERANCE: f64 = 0.01;

/// Circular arc traced from `start_angle` through `sweep_angle` radians.
///
/// `sweep_angle` is never negative: arcs always run in the increasing-angle
/// direction (clockwise on a y-down screen).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcSegment {
    pub center: Vec2,
    pub radius: f32,
    pub start_angle: f32,
    pub sweep_angle: f32,
}

impl ArcSegment {
    #[inline]
    pub fn end_angle(&self) -> f32 {
        self.start_angle + self.sweep_angle
    }

    #[inline]
    pub fn point_at(&self, angle: f32) -> Vec2 {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    #[inline]
    pub fn start_point(&self) -> Vec2 {
        self.point_at(self.start_angle)
    }

    #[inline]
    pub fn end_point(&self) -> Vec2 {
        self.point_at(self.end_angle())
    }

    fn to_kurbo(self) -> kurbo::Arc {
        kurbo::Arc {
            center: self.center.into(),
            radii: kurbo::Vec2::new(self.radius as f64, self.radius as f64),
            start_angle: self.start_angle as f64,
            sweep_angle: self.sweep_angle as f64,
            x_rotation: 0.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc(ArcSegment),
    Close,
}

/// An immutable recorded path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of sub-paths (each begins with a `MoveTo`).
    pub fn sub_path_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::MoveTo(_)))
            .count()
    }

    /// Number of sub-paths terminated by an explicit close.
    pub fn closed_sub_path_count(&self) -> usize {
        self.sub_paths()
            .filter(|sp| matches!(sp.last(), Some(PathSegment::Close)))
            .count()
    }

    /// Iterates sub-paths, each slice starting at its `MoveTo`.
    pub fn sub_paths(&self) -> impl Iterator<Item = &[PathSegment]> {
        let starts: Vec<usize> = self
            .segments
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, PathSegment::MoveTo(_)))
            .map(|(i, _)| i)
            .collect();

        let len = self.segments.len();
        let ends: Vec<usize> = starts.iter().skip(1).copied().chain(core::iter::once(len)).collect();
        starts
            .into_iter()
            .zip(ends)
            .map(move |(a, b)| &self.segments[a..b])
    }

    /// Iterates all arc segments in order.
    pub fn arcs(&self) -> impl Iterator<Item = &ArcSegment> {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::Arc(a) => Some(a),
            _ => None,
        })
    }

    /// Expands the path into move / line / cubic / close elements.
    pub fn to_bez_path(&self) -> BezPath {
        let mut bez = BezPath::new();
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) => bez.move_to(p),
                PathSegment::LineTo(p) => bez.line_to(p),
                PathSegment::Arc(arc) => {
                    if arc.sweep_angle > 0.0 && arc.radius > 0.0 {
                        for el in arc.to_kurbo().append_iter(ARC_TOLERANCE) {
                            bez.push(el);
                        }
                    }
                }
                PathSegment::Close => bez.push(PathEl::ClosePath),
            }
        }
        bez
    }
}

/// Accumulates a path with cairo semantics.
///
/// - `arc` joins the current point to the arc start with a line, or starts a
///   new sub-path when there is no current point.
/// - `new_sub_path` forgets the current point without emitting anything.
/// - `close_path` returns the current point to the sub-path start.
#[derive(Debug, Default)]
pub struct PathBuilder {
    segments: Vec<PathSegment>,
    current: Option<Vec2>,
    sub_path_start: Option<Vec2>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current_point(&self) -> Option<Vec2> {
        self.current
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn new_sub_path(&mut self) {
        self.current = None;
    }

    pub fn move_to(&mut self, p: Vec2) {
        self.segments.push(PathSegment::MoveTo(p));
        self.current = Some(p);
        self.sub_path_start = Some(p);
    }

    pub fn line_to(&mut self, p: Vec2) {
        if self.current.is_none() {
            self.move_to(p);
            return;
        }
        self.segments.push(PathSegment::LineTo(p));
        self.current = Some(p);
    }

    /// Appends a circular arc from `start_angle` to `end_angle`.
    ///
    /// If `end_angle < start_angle` it is advanced by whole turns until it is
    /// not, so the sweep is always in the increasing-angle direction.
    pub fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        if !center.is_finite() || !radius.is_finite() || !start_angle.is_finite() || !end_angle.is_finite() {
            log::debug!("ignoring non-finite arc");
            return;
        }

        let mut end_angle = end_angle;
        while end_angle < start_angle {
            end_angle += TAU;
        }

        let arc = ArcSegment {
            center,
            radius: radius.max(0.0),
            start_angle,
            sweep_angle: end_angle - start_angle,
        };

        let start = arc.start_point();
        match self.current {
            Some(_) => self.segments.push(PathSegment::LineTo(start)),
            None => {
                self.segments.push(PathSegment::MoveTo(start));
                self.sub_path_start = Some(start);
            }
        }
        self.segments.push(PathSegment::Arc(arc));
        self.current = Some(arc.end_point());
    }

    pub fn close_path(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.segments.push(PathSegment::Close);
        self.current = self.sub_path_start;
    }

    /// Returns the accumulated path and resets the builder.
    pub fn take(&mut self) -> Path {
        self.current = None;
        self.sub_path_start = None;
        Path {
            segments: core::mem::take(&mut self.segments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};

    fn near(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-4
    }

    // ── arc sweep ─────────────────────────────────────────────────────────

    #[test]
    fn arc_with_end_below_start_sweeps_forward() {
        let mut b = PathBuilder::new();
        b.arc(Vec2::zero(), 10.0, 3.0 * FRAC_PI_2, FRAC_PI_2);
        let path = b.take();
        let arc = path.arcs().next().copied().unwrap();
        assert!((arc.sweep_angle - PI).abs() < 1e-5);
        assert!((arc.end_angle() - 5.0 * FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn arc_keeps_forward_sweep() {
        let mut b = PathBuilder::new();
        b.arc(Vec2::zero(), 10.0, FRAC_PI_2, 3.0 * FRAC_PI_2);
        let arc = b.take().arcs().next().copied().unwrap();
        assert!((arc.sweep_angle - PI).abs() < 1e-5);
        assert_eq!(arc.start_angle, FRAC_PI_2);
    }

    #[test]
    fn far_half_passes_through_zero_angle() {
        // From 3π/2 forward to π/2 (+2π) crosses angle 0: the +X side.
        let mut b = PathBuilder::new();
        b.arc(Vec2::zero(), 10.0, 3.0 * FRAC_PI_2, FRAC_PI_2);
        let arc = b.take().arcs().next().copied().unwrap();
        let mid = arc.point_at(arc.start_angle + arc.sweep_angle * 0.5);
        assert!(near(mid, Vec2::new(10.0, 0.0)));
    }

    // ── current point / sub-paths ─────────────────────────────────────────

    #[test]
    fn first_arc_starts_sub_path_second_joins_with_line() {
        let mut b = PathBuilder::new();
        b.arc(Vec2::zero(), 10.0, 0.0, PI);
        b.arc(Vec2::new(0.0, 20.0), 5.0, 0.0, PI);
        let path = b.take();
        let segs = path.segments();
        assert!(matches!(segs[0], PathSegment::MoveTo(p) if near(p, Vec2::new(10.0, 0.0))));
        assert!(matches!(segs[1], PathSegment::Arc(_)));
        assert!(matches!(segs[2], PathSegment::LineTo(p) if near(p, Vec2::new(5.0, 20.0))));
        assert!(matches!(segs[3], PathSegment::Arc(_)));
        assert_eq!(path.sub_path_count(), 1);
    }

    #[test]
    fn new_sub_path_breaks_the_join() {
        let mut b = PathBuilder::new();
        b.arc(Vec2::zero(), 10.0, 0.0, PI);
        b.close_path();
        b.new_sub_path();
        b.arc(Vec2::new(50.0, 0.0), 10.0, 0.0, PI);
        b.close_path();
        let path = b.take();
        assert_eq!(path.sub_path_count(), 2);
        assert_eq!(path.closed_sub_path_count(), 2);
        assert!(!path.segments().iter().any(|s| matches!(s, PathSegment::LineTo(_))));
    }

    #[test]
    fn close_without_current_point_is_ignored() {
        let mut b = PathBuilder::new();
        b.close_path();
        assert!(b.take().is_empty());
    }

    #[test]
    fn close_returns_to_sub_path_start() {
        let mut b = PathBuilder::new();
        b.move_to(Vec2::new(1.0, 2.0));
        b.line_to(Vec2::new(5.0, 2.0));
        b.close_path();
        assert_eq!(b.current_point(), Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn take_resets_builder() {
        let mut b = PathBuilder::new();
        b.arc(Vec2::zero(), 1.0, 0.0, 1.0);
        let _ = b.take();
        assert!(b.is_empty());
        assert_eq!(b.current_point(), None);
    }

    #[test]
    fn non_finite_arc_is_dropped() {
        let mut b = PathBuilder::new();
        b.arc(Vec2::zero(), f32::NAN, 0.0, 1.0);
        assert!(b.take().is_empty());
    }

    // ── bezier expansion ──────────────────────────────────────────────────

    #[test]
    fn bez_path_ends_on_arc_end_point() {
        let mut b = PathBuilder::new();
        b.arc(Vec2::new(3.0, 4.0), 10.0, 0.0, PI);
        let path = b.take();
        let bez = path.to_bez_path();
        let last = bez.elements().last().and_then(|el| el.end_point()).unwrap();
        assert!((last.x - -7.0).abs() < 1e-3);
        assert!((last.y - 4.0).abs() < 1e-3);
    }

    #[test]
    fn bez_path_keeps_close() {
        let mut b = PathBuilder::new();
        b.arc(Vec2::zero(), 10.0, 0.0, PI);
        b.close_path();
        let bez = b.take().to_bez_path();
        assert!(matches!(bez.elements().last(), Some(PathEl::ClosePath)));
        assert!(matches!(bez.elements().first(), Some(PathEl::MoveTo(_))));
    }
}
