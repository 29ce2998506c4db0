// Command-line arguments module

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the echo server
#[derive(Parser, Debug, Default)]
#[command(name = "pathecho")]
#[command(version)]
#[command(about = "Dummy HTTP server that echoes the request path as JSON", long_about = None)]
pub struct CliArgs {
    /// TCP port to listen on (defaults to 80)
    pub port: Option<u16>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}
