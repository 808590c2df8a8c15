use anyhow::Result;
use petal_engine::core::{App, AppControl, FrameCtx};
use petal_engine::coords::Viewport;
use petal_engine::device::GpuInit;
use petal_engine::paint::Color;
use petal_engine::render::SurfaceImage;
use petal_engine::window::Runtime;

use crate::commands::{commands, Command};
use crate::config::GardenConfig;
use crate::garden::Garden;
use crate::spawn::FlowerSpawner;

/// What the window has to do after a command ran against the garden.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WindowAction {
    None,
    ToggleFullscreen,
    Exit,
}

/// The interactive garden: input in, raster out through a textured quad.
pub struct GardenApp {
    config: GardenConfig,
    garden: Option<Garden>,
    image:  SurfaceImage,
}

impl GardenApp {
    pub fn new(config: GardenConfig) -> Self {
        Self { config, garden: None, image: SurfaceImage::new() }
    }

    /// Opens the window and blocks until it closes.
    pub fn run(config: GardenConfig) -> Result<()> {
        let runtime = config.runtime_config();
        log::info!("starting {} ({}x{})", config.title, config.width, config.height);
        Runtime::run(runtime, GpuInit::default(), Self::new(config))
    }

    pub fn garden(&self) -> Option<&Garden> {
        self.garden.as_ref()
    }

    /// Creates the garden on first use and follows viewport changes after.
    fn sync_garden(&mut self, viewport: Viewport) -> Result<&mut Garden> {
        match &mut self.garden {
            Some(garden) => {
                garden.resize(viewport)?;
            }
            slot @ None => {
                let spawner = match self.config.seed {
                    Some(seed) => FlowerSpawner::seeded(seed),
                    None => FlowerSpawner::from_entropy(),
                };
                *slot = Some(Garden::new(viewport, spawner)?);
            }
        }
        self.garden
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("garden missing after initialization"))
    }

    /// Runs one command against the garden.
    ///
    /// Failures are logged and leave the garden as it was.
    pub fn apply(&mut self, command: Command) -> WindowAction {
        let Some(garden) = self.garden.as_mut() else {
            return WindowAction::None;
        };

        match command {
            Command::Plant(at) => {
                if let Err(e) = garden.plant(at) {
                    log::error!("could not plant flower: {e:#}");
                }
            }
            Command::Clear => garden.clear(),
            Command::Export(format) => {
                let dir = self.config.export_dir();
                if let Err(e) = garden.export(format, &dir, &self.config.file_stem) {
                    log::error!("{format} export failed: {e:#}");
                }
            }
            Command::ToggleFullscreen => return WindowAction::ToggleFullscreen,
            Command::Quit => return WindowAction::Exit,
        }
        WindowAction::None
    }
}

impl App for GardenApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();
        if !viewport.is_valid() {
            // Minimized; nothing to draw into.
            return AppControl::Continue;
        }

        if let Err(e) = self.sync_garden(viewport) {
            log::error!("garden setup failed: {e:#}");
            return AppControl::Exit;
        }

        // ── Commands ──────────────────────────────────────────────────────
        for command in commands(ctx.input_frame) {
            match self.apply(command) {
                WindowAction::None => {}
                WindowAction::ToggleFullscreen => ctx.window.toggle_fullscreen(),
                WindowAction::Exit => return AppControl::Exit,
            }
        }

        // ── Present ───────────────────────────────────────────────────────
        let Some(garden) = self.garden.as_mut() else {
            return AppControl::Continue;
        };
        let surface_size = (garden.surface().width(), garden.surface().height());
        let needs_upload = garden.take_dirty() || self.image.size() != Some(surface_size);
        let surface = garden.surface();
        let image = &mut self.image;

        ctx.render(Color::black(), |rctx, target| {
            if needs_upload {
                image.upload(rctx, surface);
            }
            image.render(rctx, target);
        })
    }
}
