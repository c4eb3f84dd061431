//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Veritemiz - CSV cleaning service
#[derive(Parser, Debug)]
#[command(name = "vt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: ./veritemiz.yml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API
    Serve(ServeArgs),

    /// Clean a CSV file offline
    Clean(CleanArgs),

    /// Show metadata and a preview of a CSV file
    Inspect(InspectArgs),
}

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to (overrides server.host)
    #[arg(long, env = "VT_HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(long, env = "VT_PORT")]
    pub port: Option<u16>,

    /// Accepted bearer tokens, comma-separated (overrides auth.tokens)
    #[arg(long, env = "VT_API_TOKENS", value_delimiter = ',', hide_env_values = true)]
    pub tokens: Option<Vec<String>>,
}

/// Arguments for the clean command
#[derive(Args, Debug, Default)]
pub struct CleanArgs {
    /// CSV file to clean
    pub input: PathBuf,

    /// Output path (default: cleaned_<input name> next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Drop rows with a missing value
    #[arg(long)]
    pub remove_missing: bool,

    /// Drop repeated rows, keeping the first occurrence
    #[arg(long)]
    pub remove_duplicates: bool,

    /// Restrict both operations to these columns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// CSV file to inspect
    pub input: PathBuf,

    /// Number of preview rows
    #[arg(short, long, default_value = "10")]
    pub rows: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: InspectOutput,
}

/// Inspect output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectOutput {
    /// Aligned text table
    Table,
    /// JSON document
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
