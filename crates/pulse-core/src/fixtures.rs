//! Sample time entries shared by unit tests.

use chrono::{Duration, TimeZone, Utc};

use crate::entry::TimeEntry;

pub const RAW_COMPLETE_JSON: &str = r#"{
    "id": 123456789,
    "workspace_id": 12345,
    "project_id": 67890,
    "description": "Working on feature X",
    "start": "2025-01-01T08:00:00Z",
    "stop": "2025-01-01T10:30:00Z",
    "duration": 9000,
    "billable": true,
    "tags": ["development", "backend"],
    "user_id": 98765,
    "created_with": "web",
    "at": "2025-01-01T10:30:15Z"
}"#;

pub fn complete_entry() -> TimeEntry {
    TimeEntry::builder(
        123_456_789,
        12345,
        Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
        9000,
    )
    .project_id(67890)
    .description("Working on feature X")
    .stop(Utc.with_ymd_and_hms(2025, 1, 1, 10, 30, 0).unwrap())
    .billable(true)
    .tags(["development", "backend"])
    .user_id(98765)
    .created_with("web")
    .build()
}

pub fn minimal_entry() -> TimeEntry {
    TimeEntry::builder(
        987_654_321,
        12345,
        Utc.with_ymd_and_hms(2025, 1, 2, 14, 0, 0).unwrap(),
        3600,
    )
    .stop(Utc.with_ymd_and_hms(2025, 1, 2, 15, 0, 0).unwrap())
    .build()
}

/// Started an hour ago and still running.
pub fn running_entry() -> TimeEntry {
    TimeEntry::builder(111_222_333, 12345, Utc::now() - Duration::hours(1), -3600)
        .project_id(67890)
        .description("Current task")
        .tags(["urgent"])
        .build()
}

pub fn admin_entry() -> TimeEntry {
    TimeEntry::builder(
        444_555_666,
        12345,
        Utc.with_ymd_and_hms(2025, 1, 3, 9, 0, 0).unwrap(),
        3600,
    )
    .description("Admin work")
    .stop(Utc.with_ymd_and_hms(2025, 1, 3, 10, 0, 0).unwrap())
    .build()
}

pub fn quoted_entry() -> TimeEntry {
    TimeEntry::builder(
        777_888_999,
        12345,
        Utc.with_ymd_and_hms(2025, 1, 4, 13, 0, 0).unwrap(),
        5400,
    )
    .project_id(11111)
    .description(r#"Bug fix: Issue #123 | "Quote" test"#)
    .stop(Utc.with_ymd_and_hms(2025, 1, 4, 14, 30, 0).unwrap())
    .billable(true)
    .tags(["bugfix", "high-priority"])
    .build()
}

pub fn entries_batch() -> Vec<TimeEntry> {
    vec![
        complete_entry(),
        admin_entry(),
        minimal_entry(),
        running_entry(),
        quoted_entry(),
    ]
}
