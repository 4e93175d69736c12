mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::WallApp;

#[derive(Debug, Parser)]
#[command(name = "hope-wall", about = "Desktop client for the community hope wall")]
struct Args {
    /// Base URL of the wall backend.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(args.server_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Hope Wall")
            .with_inner_size([1080.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Hope Wall",
        options,
        Box::new(|_cc| Ok(Box::new(WallApp::new(cmd_tx, ui_rx)))),
    )
}
