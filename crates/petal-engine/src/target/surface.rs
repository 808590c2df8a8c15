use crate::coords::Viewport;
use crate::paint::Paint;

use super::Path;

/// One painting operation, with the path it consumed.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill `path` with `paint` using the non-zero winding rule.
    Fill { path: Path, paint: Paint },
    /// Stroke the outline of `path`.
    Stroke {
        path: Path,
        paint: Paint,
        line_width: f32,
    },
    /// Cover the whole surface with `paint`.
    Paint { paint: Paint },
}

impl DrawOp {
    #[inline]
    pub fn paint(&self) -> &Paint {
        match self {
            DrawOp::Fill { paint, .. } | DrawOp::Stroke { paint, .. } | DrawOp::Paint { paint } => {
                paint
            }
        }
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        match self {
            DrawOp::Fill { path, .. } | DrawOp::Stroke { path, .. } => Some(path),
            DrawOp::Paint { .. } => None,
        }
    }
}

/// Backend consumed by [`Context`](super::Context).
///
/// Implementations receive ops in paint order (back to front).
pub trait Surface {
    /// Surface extent in logical pixels.
    fn size(&self) -> Viewport;

    /// Consumes one painting operation.
    fn draw(&mut self, op: DrawOp);
}
