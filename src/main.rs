mod app;
mod cli;
mod color;
mod config;
mod data;
mod error;
mod export;
mod figure;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use app::FringeAccessApp;
use clap::Parser;
use eframe::egui;

use cli::Args;
use config::Config;
use state::AppState;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    log::info!("fringe-access v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Arguments: {:?}", args);

    let config = Config::resolve(&args)?;
    let path = resolve_data_path(&config)?;

    // No data, no dashboard: any load failure aborts before a window opens.
    let table = data::loader::load_file(&path, &config.columns).map_err(|e| {
        log::error!("Failed to load {}: {e}", path.display());
        anyhow::Error::new(e).context(format!("loading venue table {}", path.display()))
    })?;
    if table.is_empty() {
        log::warn!("{} contains no usable venue rows", path.display());
    }
    let settings = config.map_settings();

    if let Some(out) = &args.export {
        let (figure, summary) = figure::render(&table, &args.selection(), &settings);
        println!("{}", summary.summary_line());
        return export::write_json(out, &figure, &summary);
    }

    let state = AppState::new(Arc::new(table), path, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Edinburgh Fringe Venue Accessibility",
        options,
        Box::new(|_cc| Ok(Box::new(FringeAccessApp::new(state)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}

fn init_logging(args: &Args) {
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// CLI / env / config path if given, otherwise ask with a file dialog.
fn resolve_data_path(config: &Config) -> Result<PathBuf> {
    if let Some(path) = &config.data.path {
        return Ok(path.clone());
    }

    let picked = rfd::FileDialog::new()
        .set_title("Open venue accessibility data")
        .add_filter(
            "Supported files",
            &["csv", "json", "parquet", "pq", "xlsx", "xlsm", "xlsb", "xls", "ods"],
        )
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .pick_file();

    picked.context("no venue table given; pass --data FILE or set [data] path in the config")
}
