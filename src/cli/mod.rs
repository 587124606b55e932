//! Command-line interface for showdex.

use clap::{Parser, Subcommand};

/// showdex - read-only REST API over a TV show catalog
#[derive(Parser)]
#[command(name = "showdex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (the default when no command is given)
    Serve,

    /// Create a default config file
    Init,

    /// Check database connectivity and exit
    Ping,
}
