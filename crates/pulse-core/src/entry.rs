//! Toggl time entries.

use std::ops::Index;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::instant::EntryInstant;

/// Validation errors raised while constructing time entries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A timestamp string was neither RFC 3339 nor a naive ISO-8601 date-time.
    #[error("invalid timestamp: {value}")]
    InvalidInstant { value: String },
}

/// Wire shape of a time entry as returned by the Toggl API.
///
/// Unknown fields are ignored. Converting into a [`TimeEntry`] applies the
/// normalization rules, so prefer that type everywhere past deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntryRecord {
    pub id: i64,
    pub workspace_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub start: EntryInstant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<EntryInstant>,
    pub duration: i64,
    #[serde(default)]
    pub billable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<EntryInstant>,
}

/// One tracked time interval.
///
/// Immutable once built. A missing description is stored as the empty string
/// and an empty tag list is stored as "no tags", so entries that differ only
/// in those representations compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TimeEntryRecord", into = "TimeEntryRecord")]
pub struct TimeEntry {
    id: i64,
    workspace_id: i64,
    project_id: Option<i64>,
    description: String,
    start: EntryInstant,
    stop: Option<EntryInstant>,
    duration: i64,
    billable: bool,
    tags: Option<Vec<String>>,
    user_id: Option<i64>,
    created_with: Option<String>,
    at: Option<EntryInstant>,
}

impl From<TimeEntryRecord> for TimeEntry {
    fn from(record: TimeEntryRecord) -> Self {
        Self {
            id: record.id,
            workspace_id: record.workspace_id,
            project_id: record.project_id,
            description: record.description.unwrap_or_default(),
            start: record.start,
            stop: record.stop,
            duration: record.duration,
            billable: record.billable,
            tags: record.tags.filter(|tags| !tags.is_empty()),
            user_id: record.user_id,
            created_with: record.created_with,
            at: record.at,
        }
    }
}

impl From<TimeEntry> for TimeEntryRecord {
    fn from(entry: TimeEntry) -> Self {
        Self {
            id: entry.id,
            workspace_id: entry.workspace_id,
            project_id: entry.project_id,
            description: Some(entry.description),
            start: entry.start,
            stop: entry.stop,
            duration: entry.duration,
            billable: entry.billable,
            tags: entry.tags,
            user_id: entry.user_id,
            created_with: entry.created_with,
            at: entry.at,
        }
    }
}

impl TimeEntry {
    /// Starts building an entry from its required fields.
    pub fn builder(
        id: i64,
        workspace_id: i64,
        start: impl Into<EntryInstant>,
        duration: i64,
    ) -> TimeEntryBuilder {
        TimeEntryBuilder {
            record: TimeEntryRecord {
                id,
                workspace_id,
                project_id: None,
                description: None,
                start: start.into(),
                stop: None,
                duration,
                billable: false,
                tags: None,
                user_id: None,
                created_with: None,
                at: None,
            },
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub const fn workspace_id(&self) -> i64 {
        self.workspace_id
    }

    pub const fn project_id(&self) -> Option<i64> {
        self.project_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn start(&self) -> EntryInstant {
        self.start
    }

    pub const fn stop(&self) -> Option<EntryInstant> {
        self.stop
    }

    /// The duration in seconds as reported by the source.
    ///
    /// Negative while the entry is running. See [`Self::effective_duration`].
    pub const fn duration(&self) -> i64 {
        self.duration
    }

    pub const fn is_billable(&self) -> bool {
        self.billable
    }

    /// The entry's tags, or `None` when it has none.
    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    pub const fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn created_with(&self) -> Option<&str> {
        self.created_with.as_deref()
    }

    /// When the entry was last modified.
    pub const fn at(&self) -> Option<EntryInstant> {
        self.at
    }

    /// Returns true while the timer has not been stopped.
    pub const fn is_running(&self) -> bool {
        self.stop.is_none()
    }

    /// Duration in whole seconds, counting up to now for running entries.
    pub fn effective_duration(&self) -> i64 {
        self.effective_duration_at(Utc::now())
    }

    /// Duration in whole seconds, counting up to `now` for running entries.
    ///
    /// A naive start is read as UTC wall time.
    pub fn effective_duration_at(&self, now: DateTime<Utc>) -> i64 {
        if !self.is_running() {
            return self.duration;
        }
        (now - self.start.to_utc_lossy()).num_seconds()
    }

    /// Returns a copy with the timer stopped at `stop` after `duration` seconds.
    #[must_use]
    pub fn with_stop(self, stop: impl Into<EntryInstant>, duration: i64) -> Self {
        let mut record = TimeEntryRecord::from(self);
        record.stop = Some(stop.into());
        record.duration = duration;
        record.into()
    }

    /// Returns a copy with the description replaced. `None` clears it.
    #[must_use]
    pub fn with_description(self, description: Option<String>) -> Self {
        let mut record = TimeEntryRecord::from(self);
        record.description = description;
        record.into()
    }

    /// Returns a copy with the tags replaced. An empty list clears them.
    #[must_use]
    pub fn with_tags(self, tags: Option<Vec<String>>) -> Self {
        let mut record = TimeEntryRecord::from(self);
        record.tags = tags;
        record.into()
    }
}

/// Builder for [`TimeEntry`] values.
#[derive(Debug, Clone)]
#[must_use]
pub struct TimeEntryBuilder {
    record: TimeEntryRecord,
}

impl TimeEntryBuilder {
    pub fn project_id(mut self, project_id: i64) -> Self {
        self.record.project_id = Some(project_id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record.description = Some(description.into());
        self
    }

    pub fn stop(mut self, stop: impl Into<EntryInstant>) -> Self {
        self.record.stop = Some(stop.into());
        self
    }

    pub fn billable(mut self, billable: bool) -> Self {
        self.record.billable = billable;
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn user_id(mut self, user_id: i64) -> Self {
        self.record.user_id = Some(user_id);
        self
    }

    pub fn created_with(mut self, created_with: impl Into<String>) -> Self {
        self.record.created_with = Some(created_with.into());
        self
    }

    pub fn at(mut self, at: impl Into<EntryInstant>) -> Self {
        self.record.at = Some(at.into());
        self
    }

    pub fn build(self) -> TimeEntry {
        self.record.into()
    }
}

/// A list of time entries, as returned by `GET /me/time_entries`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeEntries(Vec<TimeEntry>);

impl TimeEntries {
    pub const fn new(entries: Vec<TimeEntry>) -> Self {
        Self(entries)
    }

    /// Parses either a JSON array of entries or a single entry object.
    ///
    /// Blank input yields an empty list.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let trimmed = json.trim_start();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)
        } else {
            serde_json::from_str::<TimeEntry>(trimmed).map(|entry| Self(vec![entry]))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeEntry> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TimeEntry] {
        &self.0
    }
}

impl Index<usize> for TimeEntries {
    type Output = TimeEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromIterator<TimeEntry> for TimeEntries {
    fn from_iter<I: IntoIterator<Item = TimeEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TimeEntries {
    type Item = TimeEntry;
    type IntoIter = std::vec::IntoIter<TimeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TimeEntries {
    type Item = &'a TimeEntry;
    type IntoIter = std::slice::Iter<'a, TimeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
