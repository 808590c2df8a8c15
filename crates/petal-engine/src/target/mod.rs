//! Drawing targets.
//!
//! Everything above this module (flowers, scenes) draws through the
//! [`RenderTarget`] protocol only. The protocol is implemented once, by
//! [`Context`], which records paths with cairo-style semantics and hands each
//! finished fill / stroke / paint to a [`Surface`] backend as a [`DrawOp`].
//!
//! Backends:
//! - [`RasterSurface`] rasterizes immediately into an RGBA8 pixmap.
//! - [`VectorSurface`] collects ops and writes an SVG / EPS / PS / PDF
//!   document when finished or dropped.
//! - [`RecordingSurface`] keeps the op stream for inspection.
//!
//! Because every backend consumes the same op stream, geometry is identical
//! across outputs; only the encoding differs.

mod context;
mod path;
mod raster;
mod recording;
mod surface;

pub mod vector;

pub use context::{render_with, Context, RenderTarget, DEFAULT_LINE_WIDTH};
pub use path::{ArcSegment, Path, PathBuilder, PathSegment, ARC_TOLERANCE};
pub use raster::RasterSurface;
pub use recording::RecordingSurface;
pub use surface::{DrawOp, Surface};
pub use vector::{VectorFormat, VectorSurface};
