// SPDX-License-Identifier: MIT

//! Pending operations for offline mutation tracking.
//!
//! Every mutation that could not be confirmed by the remote service is
//! recorded as a [`PendingOp`] and appended to the persisted queue. Ops
//! are replayed strictly in FIFO insertion order: a later `UpdateTask`
//! may target a task created by an earlier queued `AddTask`, so order is
//! load-bearing.
//!
//! The enum is a closed sum type matched exhaustively at replay time.
//! A new operation kind cannot be silently skipped; it fails to compile
//! until the replay loop handles it.

use serde::{Deserialize, Serialize};

use crate::task::Status;

/// A mutation awaiting confirmation by the remote service.
///
/// Tag and field names match the persisted queue format
/// (`{"type":"ADD_TASK","title":...,"localId":...}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum PendingOp {
    /// Create a task. `local_id` records the placeholder identifier the
    /// optimistic entry was displayed under, for later correlation.
    #[serde(rename = "ADD_TASK", rename_all = "camelCase")]
    AddTask {
        title: String,
        description: String,
        local_id: String,
    },

    /// Update status and remarks of an existing task.
    #[serde(rename = "UPDATE_TASK", rename_all = "camelCase")]
    UpdateTask {
        task_id: String,
        status: Status,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        remarks: Option<String>,
    },
}

impl PendingOp {
    /// Creates an AddTask op.
    pub fn add_task(title: String, description: String, local_id: String) -> Self {
        PendingOp::AddTask {
            title,
            description,
            local_id,
        }
    }

    /// Creates an UpdateTask op.
    pub fn update_task(task_id: String, status: Status, remarks: Option<String>) -> Self {
        PendingOp::UpdateTask {
            task_id,
            status,
            remarks,
        }
    }

    /// Returns the task identifier this op refers to.
    ///
    /// For `AddTask` this is the local placeholder id.
    pub fn task_id(&self) -> &str {
        match self {
            PendingOp::AddTask { local_id, .. } => local_id,
            PendingOp::UpdateTask { task_id, .. } => task_id,
        }
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
