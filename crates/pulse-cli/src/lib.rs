//! toggl-pulse CLI library.
//!
//! This crate provides the CLI interface for converting Toggl time entries
//! into InfluxDB line protocol.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
