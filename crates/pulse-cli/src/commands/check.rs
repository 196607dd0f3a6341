//! Check command for summarizing time entries before conversion.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use pulse_core::TimeEntries;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// JSON file with time entries. Reads stdin when omitted or `-`.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

pub fn run<W: Write>(writer: &mut W, entries: &TimeEntries) -> Result<()> {
    let running = entries.iter().filter(|entry| entry.is_running()).count();
    let naive: Vec<i64> = entries
        .iter()
        .filter(|entry| !entry.start().is_zoned())
        .map(pulse_core::TimeEntry::id)
        .collect();

    writeln!(writer, "Entries: {}", entries.len())?;
    writeln!(writer, "Running: {running}")?;
    writeln!(writer, "Naive starts: {}", naive.len())?;
    if let Some(first) = naive.first() {
        writeln!(writer, "Not convertible: entry {first} has no UTC offset")?;
    }

    Ok(())
}
