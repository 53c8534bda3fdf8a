use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "calendar-agent",
    version,
    about = "Conversational calendar booking agent"
)]
pub struct Cli {
    /// Configuration file (defaults to config/agent.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, short, value_enum, default_value_t = RunMode::Rest)]
    pub mode: RunMode,
    /// Overrides `server.bind`
    #[arg(long)]
    pub rest_addr: Option<SocketAddr>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RunMode {
    /// JSON lines over stdin/stdout
    Stdio,
    /// REST API server
    Rest,
    /// Run both STDIO and REST simultaneously
    All,
}
