//! Paint model shared by every drawing target.
//!
//! Scope:
//! - color representation (straight alpha)
//! - paint sources (solid, radial gradient)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, RadialGradient};

/// Paint source for fill, stroke and whole-target paint operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    RadialGradient(RadialGradient),
}

impl Paint {
    #[inline]
    pub fn is_opaque(&self) -> bool {
        match self {
            Paint::Solid(c) => c.is_opaque(),
            Paint::RadialGradient(g) => g.stops.iter().all(|s| s.color.is_opaque()),
        }
    }
}

impl Default for Paint {
    /// Opaque black, the initial source of a fresh drawing context.
    fn default() -> Self {
        Paint::Solid(Color::black())
    }
}
