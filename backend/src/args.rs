//! Command-line arguments for the `csvdex` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Index a CSV file into a local key-value store and serve point lookups.
#[derive(Parser, Debug, Clone)]
#[command(name = "csvdex", version, about)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long = "config", default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a CSV file into the configured store and exit
    Load {
        /// CSV file to index
        csv: PathBuf,
    },
    /// Serve lookups over HTTP, optionally loading a CSV file first
    Serve {
        /// CSV file to load before the server starts
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}
