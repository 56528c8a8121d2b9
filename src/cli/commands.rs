//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Walk paginated operations of a remote service
#[derive(Parser, Debug)]
#[command(name = "pagewalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service definition file (YAML)
    #[arg(short, long, global = true)]
    pub service: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List operations of the service
    Operations,

    /// Validate the service definition
    Validate,

    /// Fetch every page of an operation
    Walk {
        /// Operation name
        operation: String,

        /// Request parameters as inline JSON
        #[arg(long, default_value = "{}")]
        params: String,

        /// Page size, written through the operation's limit token
        #[arg(long)]
        page_size: Option<u64>,

        /// Stop after this many pages (at least 1)
        #[arg(long)]
        max_pages: Option<NonZeroUsize>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one page per line)
    Json,
    /// Human-readable output
    Pretty,
}
