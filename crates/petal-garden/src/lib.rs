//! Petal garden.
//!
//! Click to grow flowers over a radial-gradient backdrop; the same scene can
//! be exported to SVG, EPS, PostScript and PDF at window size.

pub mod app;
pub mod commands;
pub mod config;
pub mod export;
pub mod flower;
pub mod garden;
pub mod scene;
pub mod spawn;

pub use app::GardenApp;
pub use config::GardenConfig;
pub use flower::Flower;
pub use garden::Garden;
pub use scene::{render_scene, Background, Scene};
