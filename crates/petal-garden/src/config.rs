use std::path::PathBuf;

use petal_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

use crate::export::{default_export_dir, DEFAULT_FILE_STEM};

/// Settings for a garden window.
#[derive(Debug, Clone)]
pub struct GardenConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub width: f64,
    pub height: f64,
    /// Where exports go; `None` means the home directory.
    pub export_dir: Option<PathBuf>,
    /// Export file name without extension.
    pub file_stem: String,
    /// Fixed RNG seed for reproducible flowers.
    pub seed: Option<u64>,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            title: "Petal Garden".to_string(),
            width: 640.0,
            height: 480.0,
            export_dir: None,
            file_stem: DEFAULT_FILE_STEM.to_string(),
            seed: None,
        }
    }
}

impl GardenConfig {
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(default_export_dir)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            ..RuntimeConfig::default()
        }
    }
}
