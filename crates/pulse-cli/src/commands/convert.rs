//! Implementation of the `pulse convert` command.
//!
//! Transforms time entries into InfluxDB line protocol, ready to be posted to
//! a `/write` endpoint. Conversion is all or nothing: one bad entry fails the
//! whole run, nothing is written and an existing output file is kept.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tempfile::NamedTempFile;

use pulse_core::{MetricBatch, TimeEntries, TimeEntry, transform_batch};

use crate::Config;

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// JSON file with time entries. Reads stdin when omitted or `-`.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write line protocol to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip entries whose timer is still running.
    #[arg(long, overrides_with = "no_skip_running")]
    pub skip_running: bool,

    /// Convert running entries even if the configuration skips them.
    #[arg(long, overrides_with = "skip_running")]
    pub no_skip_running: bool,
}

impl ConvertArgs {
    /// Whether running entries are skipped, with flags taking precedence over `config`.
    pub const fn resolve_skip_running(&self, config: &Config) -> bool {
        if self.no_skip_running {
            false
        } else {
            self.skip_running || config.skip_running
        }
    }
}

/// Transforms the entries into a batch, dropping running ones if asked.
pub fn convert(entries: &TimeEntries, skip_running: bool) -> Result<MetricBatch> {
    let selected: Vec<&TimeEntry> = entries
        .iter()
        .filter(|entry| !(skip_running && entry.is_running()))
        .collect();
    let skipped = entries.len() - selected.len();
    if skipped > 0 {
        tracing::info!(skipped, "skipping running time entries");
    }

    transform_batch(selected).context("failed to convert time entries")
}

/// Writes the batch as line protocol.
///
/// The output ends with a newline unless the batch is empty.
pub fn write_batch<W: Write>(writer: &mut W, batch: &MetricBatch) -> Result<()> {
    if !batch.is_empty() {
        writeln!(writer, "{}", batch.to_line_text()).context("failed to write line protocol")?;
    }
    Ok(())
}

/// Writes the entries as line protocol, returning the number of points written.
///
/// Nothing reaches `writer` unless every entry converts.
pub fn run<W: Write>(writer: &mut W, entries: &TimeEntries, skip_running: bool) -> Result<usize> {
    let batch = convert(entries, skip_running)?;
    write_batch(writer, &batch)?;
    Ok(batch.len())
}

/// Like [`run`], but replaces the file at `path` only once the whole batch is written.
///
/// An existing file is left untouched when conversion or writing fails.
pub fn run_to_file(path: &Path, entries: &TimeEntries, skip_running: bool) -> Result<usize> {
    let batch = convert(entries, skip_running)?;

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    write_batch(&mut file, &batch)?;
    file.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;

    Ok(batch.len())
}
