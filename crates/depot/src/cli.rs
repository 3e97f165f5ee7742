//! Command-line interface definitions.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Depot: a single-node object storage service.
#[derive(Debug, Parser)]
#[command(name = "depot", version, about)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the storage server.
    Serve(ServeArgs),
    /// Print version information.
    Version,
}

/// Arguments for the serve command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Storage root directory (overrides the config file).
    #[arg(long)]
    pub root_dir: Option<PathBuf>,

    /// Address to bind the gRPC server to (overrides the config file).
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}
