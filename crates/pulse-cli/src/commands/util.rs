//! Shared utilities for CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

use pulse_core::TimeEntries;

/// Reads time entries from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_entries(path: Option<&Path>) -> Result<TimeEntries> {
    let json = match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let entries = TimeEntries::from_json(&json).context("failed to parse time entries")?;
    tracing::debug!(entries = entries.len(), "loaded time entries");
    Ok(entries)
}
