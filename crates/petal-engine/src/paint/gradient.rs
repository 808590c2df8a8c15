use crate::coords::Vec2;

use super::Color;

/// A single gradient stop.
///
/// `t` is expected in [0, 1]. Encoders sort stops by `t` and clamp it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Two-circle radial gradient in logical pixel space.
///
/// Color at `t = 0` sits on the circle (`inner_center`, `inner_radius`) and
/// color at `t = 1` on the circle (`outer_center`, `outer_radius`). Outside
/// that range the edge stops are extended (pad).
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(
        inner_center: Vec2,
        inner_radius: f32,
        outer_center: Vec2,
        outer_radius: f32,
    ) -> Self {
        Self {
            inner_center,
            inner_radius,
            outer_center,
            outer_radius,
            stops: Vec::new(),
        }
    }

    /// Appends a color stop, builder style.
    pub fn with_stop(mut self, t: f32, color: Color) -> Self {
        self.add_stop(t, color);
        self
    }

    pub fn add_stop(&mut self, t: f32, color: Color) {
        self.stops.push(ColorStop::new(t, color));
    }

    /// Stops sorted by offset with `t` clamped to `[0, 1]`.
    pub fn sorted_stops(&self) -> Vec<ColorStop> {
        let mut stops: Vec<ColorStop> = self
            .stops
            .iter()
            .map(|s| ColorStop::new(s.t.clamp(0.0, 1.0), s.color))
            .collect();
        stops.sort_by(|a, b| a.t.total_cmp(&b.t));
        stops
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.inner_center.is_finite()
            && self.outer_center.is_finite()
            && self.inner_radius.is_finite()
            && self.outer_radius.is_finite()
            && self.inner_radius >= 0.0
            && self.outer_radius > self.inner_radius
            && self.stops.len() >= 2
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grad() -> RadialGradient {
        RadialGradient::new(Vec2::new(10.0, 10.0), 0.0, Vec2::new(10.0, 10.0), 50.0)
    }

    #[test]
    fn needs_two_stops() {
        let g = grad().with_stop(0.0, Color::white());
        assert!(!g.is_valid());
        assert!(g.with_stop(1.0, Color::black()).is_valid());
    }

    #[test]
    fn outer_radius_must_exceed_inner() {
        let mut g = grad().with_stop(0.0, Color::white()).with_stop(1.0, Color::black());
        g.outer_radius = 0.0;
        assert!(!g.is_valid());
    }

    #[test]
    fn sorted_stops_orders_and_clamps() {
        let g = grad()
            .with_stop(1.5, Color::black())
            .with_stop(0.2, Color::white());
        let s = g.sorted_stops();
        assert_eq!(s[0].t, 0.2);
        assert_eq!(s[1].t, 1.0);
    }
}
