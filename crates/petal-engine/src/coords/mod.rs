//! Coordinate types shared by the drawing targets, the GPU bridge and the garden.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Angles are radians; increasing angles turn clockwise on screen because +Y
//! points down.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
