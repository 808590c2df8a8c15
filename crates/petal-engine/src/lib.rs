//! Petal engine crate.
//!
//! Platform + GPU runtime, coordinate and paint types, and the drawing-target
//! layer (`target`) that higher layers render through.

pub mod core;
pub mod device;
pub mod input;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod target;
