use crate::coords::Viewport;

use super::{DrawOp, Surface};

/// Surface that keeps every op it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Viewport,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(size: Viewport) -> Self {
        Self { size, ops: Vec::new() }
    }

    #[inline]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        core::mem::take(&mut self.ops)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}
