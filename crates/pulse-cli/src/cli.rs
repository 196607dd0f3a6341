//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::check::CheckArgs;
use crate::commands::convert::ConvertArgs;

/// Toggl to InfluxDB converter.
///
/// Reads Toggl time entries as JSON and writes them as InfluxDB line protocol.
#[derive(Debug, Parser)]
#[command(name = "pulse", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert time entries to line protocol.
    Convert(ConvertArgs),

    /// Summarize time entries without converting them.
    Check(CheckArgs),
}
