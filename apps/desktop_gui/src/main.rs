mod backend_bridge;
mod controller;
mod settings;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use game_core::RoundController;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::settings::{load_settings, AppPaths};
use crate::ui::DesktopGuiApp;

#[derive(Debug, Parser)]
#[command(name = "match_cards", about = "Memory matching card game")]
struct Cli {
    /// Directory holding the settings file, card images and score database.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Extra settings file layered over the one in the data directory.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    assets_dir: Option<PathBuf>,
    #[arg(long)]
    database_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let paths = AppPaths::resolve(cli.data_dir.as_deref())?;
    let settings = load_settings(&paths, cli.config.as_deref())?;
    let game = settings.game_config().context("invalid game settings")?;

    let database_url = cli
        .database_url
        .or_else(|| settings.database_url.clone())
        .unwrap_or_else(|| paths.database_url());
    let assets_dir = cli
        .assets_dir
        .or_else(|| settings.assets_dir.clone())
        .unwrap_or_else(|| paths.assets_dir.clone());
    tracing::info!(
        rows = game.rows,
        columns = game.columns,
        assets_dir = %assets_dir.display(),
        "starting match cards"
    );

    let controller = RoundController::new(game)?;
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, database_url);
    if cmd_tx.send(BackendCommand::LoadBest).is_err() {
        tracing::warn!("backend worker exited before the best score was requested");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Match Cards")
            .with_inner_size([560.0, 640.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Match Cards",
        options,
        Box::new(move |cc| {
            Ok(Box::new(DesktopGuiApp::new(
                &cc.egui_ctx,
                controller,
                &assets_dir,
                cmd_tx,
                ui_rx,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop ui failed: {err}"))
}
