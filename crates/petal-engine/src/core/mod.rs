//! Core engine-facing contracts.
//!
//! The runtime drives an [`App`] through these types; nothing here exposes the
//! event loop itself.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
