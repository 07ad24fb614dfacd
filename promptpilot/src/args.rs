use std::path::PathBuf;

use clap::Parser;

/// Promptpilot streaming relay
#[derive(Debug, Parser)]
#[command(name = "promptpilot", about = "Prompt optimization relay for OpenAI-compatible APIs")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "promptpilot.toml", env = "PROMPTPILOT_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "PROMPTPILOT_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
