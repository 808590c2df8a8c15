//! GPU presentation.
//!
//! Drawing itself happens on the CPU (see [`crate::target`]); this module only
//! gets finished pixels onto the window.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod ctx;
mod image;

pub use ctx::{FrameTarget, RenderCtx};
pub use image::SurfaceImage;
