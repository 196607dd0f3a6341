//! Workspaces and projects that time entries refer to.

use serde::{Deserialize, Serialize};

/// A Toggl workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
}

/// A Toggl project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub workspace_id: i64,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Hex color, e.g. `#0b83d9`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
}

const fn default_active() -> bool {
    true
}
