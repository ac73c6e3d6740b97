mod catalog;
mod config;
mod launcher;
mod ui;

use anyhow::Result;
use eframe::NativeOptions;
use log::{info, LevelFilter};

use config::Config;
use ui::app::GamesHubApp;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Mini Games Hub");

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            // Create default configuration if it doesn't exist
            let config = Config::default();
            config.save()?;
            config
        }
    };

    // GUI Options
    let options = NativeOptions {
        initial_window_size: Some(egui::vec2(1200.0, 800.0)),
        ..Default::default()
    };

    // Run application
    eframe::run_native(
        "Mini Games Hub",
        options,
        Box::new(|cc| Box::new(GamesHubApp::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
