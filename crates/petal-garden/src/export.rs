//! Writing the scene out as a document.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use petal_engine::coords::Viewport;
use petal_engine::target::{VectorFormat, VectorSurface};

use crate::scene::{render_scene, Scene};

pub const DEFAULT_FILE_STEM: &str = "FlowerShot";

/// The user's home directory, or the working directory when there is none.
pub fn default_export_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        log::warn!("no home directory; exporting to the working directory");
        PathBuf::from(".")
    })
}

/// `<dir>/<stem>.<ext>`
pub fn export_path(dir: &Path, stem: &str, format: VectorFormat) -> PathBuf {
    dir.join(format!("{stem}.{}", format.extension()))
}

/// Renders `scene` as a `format` document into `sink` and returns the sink.
pub fn write_document<W: Write>(
    scene: &Scene,
    viewport: Viewport,
    format: VectorFormat,
    sink: W,
) -> Result<W> {
    let mut surface = VectorSurface::new(sink, format, viewport);
    render_scene(scene, &mut surface);
    surface.finish()
}

/// Renders `scene` into a new file at `path`, replacing any existing one.
///
/// The file is complete when this returns.
pub fn export_to_file(
    scene: &Scene,
    viewport: Viewport,
    format: VectorFormat,
    path: &Path,
) -> Result<()> {
    let mut surface = VectorSurface::create(path, format, viewport)?;
    render_scene(scene, &mut surface);
    surface.finish()?;
    Ok(())
}
