use std::path::{Path, PathBuf};

use anyhow::{ensure, Result};
use petal_engine::coords::{Vec2, Viewport};
use petal_engine::target::{render_with, RasterSurface, VectorFormat};
use rand::rngs::StdRng;
use rand::Rng;

use crate::export::{export_path, export_to_file};
use crate::flower::Flower;
use crate::scene::{render_scene, Scene};
use crate::spawn::FlowerSpawner;

/// The garden's state: its scene and the live raster it is kept drawn into.
///
/// Every mutation leaves the raster matching the scene and raises the dirty
/// flag; the presenter collects the flag with [`Garden::take_dirty`].
pub struct Garden<R: Rng = StdRng> {
    scene: Scene,
    surface: RasterSurface,
    viewport: Viewport,
    spawner: FlowerSpawner<R>,
    dirty: bool,
}

impl<R: Rng> Garden<R> {
    /// Creates an empty garden drawn at `viewport` size.
    pub fn new(viewport: Viewport, spawner: FlowerSpawner<R>) -> Result<Self> {
        ensure!(viewport.is_valid(), "garden viewport must be non-empty, got {viewport:?}");
        let surface = RasterSurface::for_viewport(viewport)?;

        let mut garden = Self {
            scene: Scene::new(),
            surface,
            viewport,
            spawner,
            dirty: true,
        };
        garden.redraw();
        Ok(garden)
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Grows a random flower at `at`.
    ///
    /// Only the new flower is painted; what is already on the raster stays.
    pub fn plant(&mut self, at: Vec2) -> Result<&Flower> {
        let flower = self.spawner.spawn(at)?;
        render_with(&mut self.surface, |target| flower.paint(target));
        log::debug!(
            "planted {} petals at ({:.0}, {:.0})",
            flower.petal_count(),
            at.x,
            at.y
        );
        self.dirty = true;
        Ok(self.scene.push(flower))
    }

    /// Adds an existing flower on top.
    pub fn push(&mut self, flower: Flower) -> &Flower {
        render_with(&mut self.surface, |target| flower.paint(target));
        self.dirty = true;
        self.scene.push(flower)
    }

    /// Removes every flower and redraws the bare background.
    pub fn clear(&mut self) {
        log::debug!("clearing {} flowers", self.scene.len());
        self.scene.clear();
        self.redraw();
    }

    /// Follows a viewport change.
    ///
    /// When the pixel size changes the raster is reallocated and the whole
    /// scene redrawn; returns whether that happened.
    pub fn resize(&mut self, viewport: Viewport) -> Result<bool> {
        ensure!(viewport.is_valid(), "garden viewport must be non-empty, got {viewport:?}");
        if viewport.pixel_size() == self.viewport.pixel_size() {
            self.viewport = viewport;
            return Ok(false);
        }

        self.surface = RasterSurface::for_viewport(viewport)?;
        self.viewport = viewport;
        self.redraw();
        log::debug!("garden resized to {}x{}", self.surface.width(), self.surface.height());
        Ok(true)
    }

    /// Writes the scene to `<dir>/<stem>.<ext>` at the current viewport size.
    ///
    /// Garden state is untouched whether or not this succeeds.
    pub fn export(&self, format: VectorFormat, dir: &Path, stem: &str) -> Result<PathBuf> {
        let path = export_path(dir, stem, format);
        export_to_file(&self.scene, self.viewport, format, &path)?;
        log::info!("exported {} flowers as {format} to {}", self.scene.len(), path.display());
        Ok(path)
    }

    /// Returns whether the raster changed since the last call, and resets it.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    fn redraw(&mut self) {
        render_scene(&self.scene, &mut self.surface);
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_engine::paint::Color;

    fn garden() -> Garden {
        Garden::new(Viewport::new(200.0, 150.0), FlowerSpawner::seeded(3)).unwrap()
    }

    fn pixels(g: &Garden) -> Vec<u8> {
        g.surface().data().to_vec()
    }

    // ── lifecycle ───────────────────────────────────────────────────────

    #[test]
    fn new_garden_shows_background() {
        let mut g = garden();
        assert!(g.take_dirty());
        assert!(!g.take_dirty());
        assert!(g.scene().is_empty());

        // Center is the white end of the gradient.
        let [r, gr, b, a] = g.surface().pixel(100, 75).unwrap();
        assert!(r > 250 && gr > 250 && b > 250);
        assert_eq!(a, 255);
    }

    #[test]
    fn empty_viewport_is_rejected() {
        assert!(Garden::new(Viewport::new(0.0, 100.0), FlowerSpawner::seeded(1)).is_err());
    }

    // ── mutations ───────────────────────────────────────────────────────

    #[test]
    fn plant_appends_and_paints_incrementally() {
        let mut g = garden();
        g.take_dirty();
        let before = pixels(&g);

        let center = g.plant(Vec2::new(100.0, 75.0)).unwrap().center();
        assert_eq!(center, Vec2::new(100.0, 75.0));
        assert_eq!(g.scene().len(), 1);
        assert!(g.take_dirty());
        assert_ne!(pixels(&g), before);
    }

    #[test]
    fn incremental_paint_matches_full_redraw() {
        let mut g = garden();
        g.plant(Vec2::new(60.0, 60.0)).unwrap();
        g.plant(Vec2::new(120.0, 90.0)).unwrap();
        let incremental = pixels(&g);

        let mut full = RasterSurface::for_viewport(g.viewport()).unwrap();
        render_scene(g.scene(), &mut full);
        assert_eq!(full.data(), incremental.as_slice());
    }

    #[test]
    fn clear_restores_background_and_is_idempotent() {
        let mut g = garden();
        let empty = pixels(&g);
        g.plant(Vec2::new(100.0, 75.0)).unwrap();
        g.take_dirty();

        g.clear();
        assert!(g.take_dirty());
        assert!(g.scene().is_empty());
        assert_eq!(pixels(&g), empty);

        g.clear();
        assert_eq!(pixels(&g), empty);
    }

    #[test]
    fn resize_reallocates_and_redraws() {
        let mut g = garden();
        g.push(
            Flower::new(Vec2::new(50.0, 50.0), 70.0, 10.0, 3.0, 10, Color::rgb(1.0, 0.0, 0.0)).unwrap(),
        );
        g.take_dirty();

        assert!(!g.resize(Viewport::new(200.2, 149.8)).unwrap());
        assert!(!g.take_dirty());

        assert!(g.resize(Viewport::new(320.0, 240.0)).unwrap());
        assert!(g.take_dirty());
        assert_eq!((g.surface().width(), g.surface().height()), (320, 240));
        assert_eq!(g.scene().len(), 1);

        let mut full = RasterSurface::new(320, 240).unwrap();
        render_scene(g.scene(), &mut full);
        assert_eq!(full.data(), g.surface().data());
    }

    // ── export ──────────────────────────────────────────────────────────

    #[test]
    fn export_names_file_by_format() {
        let mut g = garden();
        g.plant(Vec2::new(100.0, 75.0)).unwrap();

        let dir = std::env::temp_dir().join(format!("petal-garden-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = g.export(VectorFormat::Svg, &dir, "FlowerShot").unwrap();
        assert_eq!(path, dir.join("FlowerShot.svg"));
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(r#"viewBox="0 0 200 150""#));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_export_leaves_state_alone() {
        let mut g = garden();
        g.plant(Vec2::new(100.0, 75.0)).unwrap();
        g.take_dirty();
        let before = pixels(&g);

        let missing = std::env::temp_dir().join("petal-garden-missing").join("deeper");
        assert!(g.export(VectorFormat::Pdf, &missing, "x").is_err());
        assert_eq!(g.scene().len(), 1);
        assert_eq!(pixels(&g), before);
        assert!(!g.take_dirty());
    }
}
