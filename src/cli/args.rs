use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agora")]
#[command(version = "0.1.0")]
#[command(about = "A terminal agora where you walk up to AI philosophers and talk", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the chat API (overrides configuration)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Walk the agora (default)
    Walk,
    /// Show the current session
    Session,
    /// Wipe the conversation memory for this session
    ResetMemory,
    /// Discard the persisted session
    ClearSession,
    /// Show version information
    Version,
}
