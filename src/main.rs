use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;

use agora::{
    cli::{build_gateway, handle_command, resolve_config, Cli},
    dialogue::{DialogueController, DialogueTiming, SharedSurface, TextSurface},
    tui::{run_ui, App},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging
    init_logger(cli.verbose);

    // Subcommands that finish without the UI
    if let Some(command) = &cli.command {
        if handle_command(command, &cli).await? {
            return Ok(());
        }
    }

    walk_the_agora(&cli).await
}

/// Wire the gateway and the dialogue engine together and run the UI
async fn walk_the_agora(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let gateway = build_gateway(&config)?;

    // The app keeps the concrete handle for rendering; the controller gets
    // the trait object it drives
    let surface = Arc::new(Mutex::new(TextSurface::new()));
    let shared: SharedSurface = surface.clone();

    let timing = DialogueTiming {
        reveal_delay: Duration::from_millis(config.dialogue.reveal_delay_ms),
        ..DialogueTiming::default()
    };
    let controller = DialogueController::new(gateway.clone(), shared, timing);

    let app = App::new(gateway, controller, surface);
    run_ui(app).await
}
