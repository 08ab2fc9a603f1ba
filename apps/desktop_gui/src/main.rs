mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::LawDeskApp;

#[derive(Parser, Debug)]
#[command(name = "lawdesk-gui", about = "Desktop legal query assistant")]
struct Args {
    /// Base URL of the answering service; overrides lawdesk.toml and env.
    #[arg(long)]
    endpoint_url: Option<String>,
    /// Base URL the corpus document is served from.
    #[arg(long)]
    document_base_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(endpoint_url) = args.endpoint_url {
        settings.endpoint_url = endpoint_url;
    }
    if let Some(document_base_url) = args.document_base_url {
        settings.document_base_url = document_base_url;
    }
    tracing::info!(
        endpoint = %settings.endpoint_url,
        document = %settings.document_url(),
        "starting desktop shell"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Westeros Legal Research")
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Westeros Legal Research",
        options,
        Box::new(move |_cc| Ok(Box::new(LawDeskApp::new(cmd_tx, ui_rx, &settings)))),
    )
}
