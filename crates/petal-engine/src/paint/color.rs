/// Straight-alpha RGBA color with channels in `[0, 1]`.
///
/// This matches how document formats (SVG, PostScript, PDF) express color:
/// RGB and opacity are separate. Premultiplication happens only inside the
/// raster backend.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Creates a color from hue/saturation/value, all in `[0, 1]`.
    ///
    /// Hue wraps, so `1.0` is the same red as `0.0`.
    pub fn from_hsva(h: f32, s: f32, v: f32, a: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        if s <= 0.0 {
            return Self::new(v, v, v, a);
        }

        // rem_euclid can round a tiny negative hue up to exactly 1.0.
        let h6 = h.rem_euclid(1.0) * 6.0;
        let h6 = if h6 >= 6.0 { 0.0 } else { h6 };
        let sector = h6.floor();
        let f = h6 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(r, g, b, a)
    }

    /// Multiplies the RGB channels by `factor`; alpha is left untouched.
    #[inline]
    pub fn scale_rgb(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// True when every channel lies in `[0, 1]`.
    #[inline]
    pub fn is_normalized(self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Straight-alpha bytes, rounded.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl From<Color> for tiny_skia::Color {
    fn from(c: Color) -> Self {
        tiny_skia::Color::from_rgba(
            c.r.clamp(0.0, 1.0),
            c.g.clamp(0.0, 1.0),
            c.b.clamp(0.0, 1.0),
            c.a.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5
            && (a.g - b.g).abs() < 1e-5
            && (a.b - b.b).abs() < 1e-5
            && (a.a - b.a).abs() < 1e-5
    }

    // ── from_hsva ─────────────────────────────────────────────────────────

    #[test]
    fn hsv_primaries() {
        assert!(close(Color::from_hsva(0.0, 1.0, 1.0, 1.0), Color::rgb(1.0, 0.0, 0.0)));
        assert!(close(Color::from_hsva(1.0 / 3.0, 1.0, 1.0, 1.0), Color::rgb(0.0, 1.0, 0.0)));
        assert!(close(Color::from_hsva(2.0 / 3.0, 1.0, 1.0, 1.0), Color::rgb(0.0, 0.0, 1.0)));
    }

    #[test]
    fn hsv_hue_wraps() {
        assert!(close(Color::from_hsva(1.0, 1.0, 1.0, 0.5), Color::from_hsva(0.0, 1.0, 1.0, 0.5)));
    }

    #[test]
    fn hsv_tiny_negative_hue_is_red() {
        assert_eq!((-1e-9f32).rem_euclid(1.0), 1.0);
        assert!(close(Color::from_hsva(-1e-9, 1.0, 1.0, 1.0), Color::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn hsv_zero_saturation_is_gray() {
        assert!(close(Color::from_hsva(0.7, 0.0, 0.4, 1.0), Color::rgb(0.4, 0.4, 0.4)));
    }

    #[test]
    fn hsv_keeps_alpha_and_stays_normalized() {
        for i in 0..50 {
            let c = Color::from_hsva(i as f32 / 50.0, 1.0, 1.0, 0.65);
            assert_eq!(c.a, 0.65);
            assert!(c.is_normalized());
        }
    }

    // ── scale_rgb / bytes ─────────────────────────────────────────────────

    #[test]
    fn scale_rgb_leaves_alpha() {
        let c = Color::new(1.0, 0.5, 0.25, 0.65).scale_rgb(0.8);
        assert!(close(c, Color::new(0.8, 0.4, 0.2, 0.65)));
    }

    #[test]
    fn rgba8_rounds() {
        assert_eq!(Color::rgb(0.6, 0.6, 0.6).to_rgba8(), [153, 153, 153, 255]);
    }
}
