// SPDX-License-Identifier: MIT

//! Error types for ot-core operations.

use thiserror::Error;

/// All possible errors that can occur in ot-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid status: '{0}'\n  hint: valid statuses are: Pending, In Progress, Completed")]
    InvalidStatus(String),

    #[error("corrupted queue entry: {0}")]
    CorruptedQueue(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for ot-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
