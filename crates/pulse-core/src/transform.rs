//! Mapping from Toggl time entries to InfluxDB points.
//!
//! Each entry becomes one point in the [`MEASUREMENT`] measurement:
//!
//! - tags: `workspace_id`, `project_id` (or `unknown`), `billable`, and
//!   `tags` (the entry's tags joined with `|`) when the entry has any
//! - fields: `duration` (seconds, as reported) and `description`
//! - timestamp: the entry's start, in epoch milliseconds

use std::collections::HashMap;

use thiserror::Error;

use crate::entry::TimeEntry;
use crate::instant::EntryInstant;
use crate::metric::{FieldValue, MetricBatch, MetricPoint, PointError};

/// Measurement name for time entry points.
pub const MEASUREMENT: &str = "toggl_time_entry";

/// Tag value used when an entry has no project.
pub const UNKNOWN_PROJECT: &str = "unknown";

/// Separator between an entry's tags in the `tags` tag.
pub const TAG_SEPARATOR: &str = "|";

/// Errors raised while transforming a time entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The entry's start has no UTC offset, so its epoch time is unknown.
    #[error("invalid timestamp for time entry {entry_id}: {instant} has no UTC offset")]
    InvalidTimestamp { entry_id: i64, instant: EntryInstant },

    #[error("failed to build point for time entry {entry_id}")]
    Point {
        entry_id: i64,
        #[source]
        source: PointError,
    },
}

impl TransformError {
    /// The id of the entry that failed to transform.
    pub const fn entry_id(&self) -> i64 {
        match self {
            Self::InvalidTimestamp { entry_id, .. } | Self::Point { entry_id, .. } => *entry_id,
        }
    }
}

/// Epoch milliseconds of the entry's start.
pub fn format_timestamp(entry: &TimeEntry) -> Result<i64, TransformError> {
    let start = entry.start();
    start
        .epoch_millis()
        .ok_or(TransformError::InvalidTimestamp {
            entry_id: entry.id(),
            instant: start,
        })
}

/// Makes a value safe to use as a tag value: commas become semicolons and
/// surrounding whitespace is dropped.
pub fn sanitize_tag_value(value: &str) -> String {
    value.replace(',', ";").trim().to_string()
}

/// Tags for an entry's point.
///
/// The `tags` key is absent when the entry has no tags, or when every tag is
/// blank after sanitizing.
pub fn build_tags(entry: &TimeEntry) -> HashMap<String, String> {
    let project = entry
        .project_id()
        .filter(|&id| id != 0)
        .map_or_else(|| UNKNOWN_PROJECT.to_string(), |id| id.to_string());

    let mut tags = HashMap::from([
        ("workspace_id".to_string(), entry.workspace_id().to_string()),
        ("project_id".to_string(), project),
        ("billable".to_string(), entry.is_billable().to_string()),
    ]);

    let entry_tags: Vec<String> = entry
        .tags()
        .unwrap_or_default()
        .iter()
        .map(|tag| sanitize_tag_value(tag))
        .filter(|tag| !tag.is_empty())
        .collect();
    if !entry_tags.is_empty() {
        tags.insert("tags".to_string(), entry_tags.join(TAG_SEPARATOR));
    }

    tags
}

/// Fields for an entry's point, in encoding order.
///
/// `duration` is the stored duration, so running entries keep their negative value.
pub fn build_fields(entry: &TimeEntry) -> Vec<(String, FieldValue)> {
    vec![
        ("duration".to_string(), FieldValue::Integer(entry.duration())),
        (
            "description".to_string(),
            FieldValue::String(entry.description().to_string()),
        ),
    ]
}

/// Transforms one entry into one point.
pub fn transform_time_entry(entry: &TimeEntry) -> Result<MetricPoint, TransformError> {
    let timestamp = format_timestamp(entry)?;
    MetricPoint::new(MEASUREMENT, build_tags(entry), build_fields(entry), timestamp).map_err(
        |source| TransformError::Point {
            entry_id: entry.id(),
            source,
        },
    )
}

/// Transforms entries in order into a batch.
///
/// Stops at the first entry that fails and returns its error; no partial
/// batch is produced.
pub fn transform_batch<'a, I>(entries: I) -> Result<MetricBatch, TransformError>
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    let mut points = Vec::new();
    for entry in entries {
        match transform_time_entry(entry) {
            Ok(point) => points.push(point),
            Err(err) => {
                tracing::warn!(entry_id = entry.id(), error = %err, "aborting batch transform");
                return Err(err);
            }
        }
    }

    tracing::debug!(points = points.len(), "transformed time entries");
    Ok(MetricBatch::new(points))
}
