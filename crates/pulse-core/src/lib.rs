//! Core domain logic for toggl-pulse.
//!
//! This crate contains the fundamental types and logic for:
//! - Time entries: validated, immutable Toggl time entry values
//! - Metrics: InfluxDB points and batches with line protocol encoding
//! - Transformation: mapping time entries onto metric points

pub mod entry;
pub mod instant;
pub mod metric;
pub mod transform;
pub mod workspace;

#[cfg(test)]
mod fixtures;

pub use entry::{TimeEntries, TimeEntry, TimeEntryBuilder, TimeEntryRecord, ValidationError};
pub use instant::EntryInstant;
pub use metric::{FieldValue, MetricBatch, MetricPoint, MetricPointBuilder, PointError};
pub use transform::{MEASUREMENT, TransformError, transform_batch, transform_time_entry};
pub use workspace::{Project, Workspace};
