use clap::Parser;
use client_core::{load_settings, ClientConfig};
use crossbeam_channel::bounded;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::OrderDeskApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop front end for the package order service")]
struct Args {
    /// Overrides `server_url` from order_desk.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    auth_token: Option<String>,
}

fn startup_config(args: Args) -> ClientConfig {
    let mut config = load_settings();
    if let Some(server_url) = args.server_url {
        config.server_url = server_url;
    }
    if let Some(auth_token) = args.auth_token {
        config.auth_token = auth_token;
    }
    config
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = startup_config(Args::parse());
    tracing::info!(server_url = %config.server_url, "starting order desk");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(config.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Order Desk")
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Order Desk",
        options,
        Box::new(move |_cc| Ok(Box::new(OrderDeskApp::new(&config, cmd_tx, ui_rx)))),
    )
}
