mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::StoreLensApp;
use eframe::egui;
use state::AppState;

/// Conventional file name of the source data, looked up in the working
/// directory when no path is given on the command line.
const DEFAULT_DATA_FILE: &str = "Sample - Superstore.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // One-time dataset load, completed before the UI serves any
    // interaction. An explicit path that fails to load is fatal; the
    // fallback file is optional and the user can File → Open instead.
    let mut state = AppState::default();
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        let dataset = data::loader::load_csv(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        log::info!("Loaded {} records from {}", dataset.len(), path.display());
        state.set_dataset(dataset);
    } else {
        let fallback = PathBuf::from(DEFAULT_DATA_FILE);
        if fallback.exists() {
            ui::panels::load_into(&mut state, &fallback);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Storelens – Sales & Profit Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(StoreLensApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
