use petal_engine::logging::{init_logging, LoggingConfig};
use petal_garden::{GardenApp, GardenConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = GardenConfig::default();
    log::info!(
        "click to plant; F fullscreen, X clear, S/E/P/D export to {}",
        config.export_dir().display()
    );

    GardenApp::run(config)
}
