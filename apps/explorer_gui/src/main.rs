mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use client_core::{load_settings, load_settings_from};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{ExplorerApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Browse food nutrition tables by category, food, table, and column")]
struct Args {
    /// Catalog server base URL; overrides the settings file and environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file to read instead of ./food_explorer.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = match &args.config {
        Some(path) => load_settings_from(path, |name| std::env::var(name).ok()),
        None => load_settings(),
    }
    .context("failed to load settings")?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    settings
        .server_base_url()
        .context("catalog server url is not usable")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Food Explorer")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };
    let startup = StartupConfig {
        server_url: settings.server_url,
    };
    eframe::run_native(
        "Food Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(ExplorerApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("explorer window failed: {err}"))
}
