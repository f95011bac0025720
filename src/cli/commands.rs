use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::warn;

use crate::{
    api::{ChatBackend, ConversationGateway, HttpBackend},
    app::{init_config, load_config, Config},
    session::{SessionManager, SessionOrigin, SessionStore},
};

use super::{Cli, Commands};

/// Handle CLI subcommands
pub async fn handle_command(command: &Commands, cli: &Cli) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing Agora configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(true)
        }
        Commands::Session => {
            show_session(cli).await?;
            Ok(true)
        }
        Commands::ResetMemory => {
            reset_memory(cli).await?;
            Ok(true)
        }
        Commands::ClearSession => {
            clear_session(cli).await?;
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Walk => Ok(false), // Continue to the agora interface
    }
}

/// Resolve the effective configuration. An explicit --config file wins over
/// the discovery chain; --api-url overrides either.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(path) = &cli.config {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?
    } else {
        load_config().unwrap_or_else(|err| {
            warn!("{err:#}; using default configuration");
            Config::default()
        })
    };

    if let Some(api_url) = &cli.api_url {
        config.backend.api_url = api_url.clone();
    }
    Ok(config)
}

/// Wire the HTTP backend, the session store and the gateway together
pub fn build_gateway(config: &Config) -> Result<Arc<ConversationGateway>> {
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::new(
        &config.backend.api_url,
        Duration::from_secs(config.backend.timeout_secs),
    )?);
    let store = SessionStore::open_default()?;
    let sessions = SessionManager::new(backend.clone(), store);
    Ok(Arc::new(ConversationGateway::new(backend, sessions)))
}

/// Print the current session, creating one if none is active
async fn show_session(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let gateway = build_gateway(&config)?;
    let session = gateway.ensure_session().await;

    println!("Current session:");
    println!("  user id:    {}", session.user_id.green());
    println!("  created at: {}", session.created_at);
    match session.origin {
        SessionOrigin::Server => println!("  origin:     {}", "server".green()),
        SessionOrigin::Fallback => println!("  origin:     {}", "fallback".yellow()),
    }
    Ok(())
}

/// Wipe the backend's conversation memory for the active session.
/// Failures must reach the user here, unlike the chat path.
async fn reset_memory(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let gateway = build_gateway(&config)?;
    let outcome = gateway
        .reset_memory()
        .await
        .context("Failed to reset conversation memory")?;

    let message = outcome
        .message
        .unwrap_or_else(|| "Conversation memory reset.".to_string());
    println!("{}", message.green());
    Ok(())
}

/// Remove the persisted session so the next run starts fresh
async fn clear_session(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let gateway = build_gateway(&config)?;
    gateway.clear_session().await;
    println!("{}", "Session cleared.".green());
    Ok(())
}

/// Show version information
pub fn show_version() {
    println!("{}", version_banner());
}

fn version_banner() -> String {
    format!(
        "Agora v{}\nA terminal agora where you walk up to AI philosophers and talk",
        env!("CARGO_PKG_VERSION")
    )
}
