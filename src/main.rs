mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::RestaurantFinderApp;
use clap::Parser;
use cli::Cli;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // The dataset is loaded once; nothing is shown if that fails.
    let data = match data::loader::load_and_clean(&cli.data) {
        Ok(data) => data,
        Err(e) => {
            log::error!("Failed to load dataset: {e}");
            return Err(e).context("loading restaurant dataset");
        }
    };

    if let Some(command) = &cli.command {
        return cli::run(command, &data);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Restaurant Finder",
        options,
        Box::new(move |_cc| Ok(Box::new(RestaurantFinderApp::new(data)))),
    )
    .map_err(|e| anyhow!("window closed with an error: {e}"))
}
