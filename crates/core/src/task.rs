// SPDX-License-Identifier: MIT

//! Core task types for the offline task client.
//!
//! Field names and status strings serialize exactly as the persisted
//! snapshot format expects (camelCase, `"In Progress"` with a space), so
//! snapshots written by older client builds remain readable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Not yet started. Initial state for new tasks.
    Pending,
    /// Currently being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Successfully completed.
    Completed,
}

impl Status {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Pending" => Ok(Status::Pending),
            "In Progress" => Ok(Status::InProgress),
            "Completed" => Ok(Status::Completed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A single task as displayed in the list and persisted in the snapshot.
///
/// Tasks are only ever created and updated, never deleted. The `id` is
/// either a canonical server-assigned identifier or a `local-` prefixed
/// placeholder for a task created while offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier. Server-assigned, or `local-<millis>` until synced.
    pub id: String,
    /// Short title shown in the list.
    pub title: String,
    /// Longer description shown in the detail view.
    pub description: String,
    /// Current workflow status.
    pub status: Status,
    /// Free-form remarks attached by the user, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// Last time this task was modified, locally or remotely.
    pub last_updated: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task with the given identifier, stamped now.
    pub fn new(id: String, title: String, description: String) -> Self {
        Task {
            id,
            title,
            description,
            status: Status::Pending,
            remarks: None,
            last_updated: Utc::now(),
        }
    }

    /// Returns true if this task carries a local placeholder identifier.
    pub fn has_local_id(&self) -> bool {
        self.id.starts_with(LOCAL_ID_PREFIX)
    }
}

/// Prefix for locally generated placeholder identifiers.
///
/// Keeps the local namespace disjoint from server-assigned ids so an
/// unsynced task can never collide with a canonical one.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Generates a fresh placeholder identifier from the current wall clock.
pub fn local_task_id(now: DateTime<Utc>) -> String {
    format!("{}{}", LOCAL_ID_PREFIX, now.timestamp_millis())
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
