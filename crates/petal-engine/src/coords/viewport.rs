use super::Vec2;

/// Viewport size in logical pixels.
///
/// Drawing targets are sized by a viewport; the GPU bridge also uses it as the
/// coordinate basis for converting logical px positions to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Center point of the viewport.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whole-pixel dimensions, at least 1×1.
    #[inline]
    pub fn pixel_size(self) -> (u32, u32) {
        (
            (self.width.round() as u32).max(1),
            (self.height.round() as u32).max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_half_extent() {
        assert_eq!(Viewport::new(640.0, 480.0).center(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn pixel_size_never_zero() {
        assert_eq!(Viewport::new(0.0, 0.2).pixel_size(), (1, 1));
        assert_eq!(Viewport::new(640.4, 479.6).pixel_size(), (640, 480));
    }

    #[test]
    fn zero_or_nan_is_invalid() {
        assert!(!Viewport::new(0.0, 10.0).is_valid());
        assert!(!Viewport::new(f32::NAN, 10.0).is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }
}
