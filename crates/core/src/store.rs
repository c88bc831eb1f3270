// SPDX-License-Identifier: MIT

//! Durable key-value store for the offline task client.
//!
//! Holds the three persisted records the client needs to survive a
//! process restart: the auth token, the last-known task snapshot, and
//! the pending-operation queue. Each record lives in its own file under
//! a single state directory:
//!
//! - `token` - the opaque auth token, plain text
//! - `tasks.json` - full task snapshot, overwritten on every write
//! - `queue.jsonl` - pending ops, one JSON line per op, appended and
//!   fsynced immediately
//!
//! Only single-file atomicity is assumed; all callers run on the single
//! UI thread, so there are no concurrent writers to guard against.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::op::PendingOp;
use crate::task::Task;

/// Token filename within the state directory.
const TOKEN_NAME: &str = "token";
/// Task snapshot filename within the state directory.
const TASKS_NAME: &str = "tasks.json";
/// Pending-operation queue filename within the state directory.
const QUEUE_NAME: &str = "queue.jsonl";

/// Persistent store rooted at a state directory.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Opens (creating if necessary) a store at the given directory.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Store {
            dir: dir.to_path_buf(),
        })
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_NAME)
    }

    fn tasks_path(&self) -> PathBuf {
        self.dir.join(TASKS_NAME)
    }

    fn queue_path(&self) -> PathBuf {
        self.dir.join(QUEUE_NAME)
    }

    /// Returns the persisted auth token, if any.
    pub fn get_token(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.token_path()) {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persists the auth token.
    pub fn set_token(&self, token: &str) -> Result<()> {
        let mut file = File::create(self.token_path())?;
        file.write_all(token.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    /// Removes the persisted auth token. Absent token is not an error.
    pub fn remove_token(&self) -> Result<()> {
        match fs::remove_file(self.token_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the last persisted task snapshot.
    ///
    /// An absent or unreadable snapshot degrades to an empty list: the
    /// snapshot is a cache of server state and can always be refetched,
    /// so corruption here is not worth failing the caller over.
    pub fn get_tasks(&self) -> Result<Vec<Task>> {
        let data = match fs::read_to_string(self.tasks_path()) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&data) {
            Ok(tasks) => Ok(tasks),
            Err(_) => Ok(Vec::new()),
        }
    }

    /// Overwrites the task snapshot with the given list.
    ///
    /// Full-snapshot replacement, never a merge.
    pub fn set_tasks(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string(tasks)?;
        let mut file = File::create(self.tasks_path())?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    /// Reads all queued operations in FIFO insertion order.
    ///
    /// Skips blank lines and returns an empty vec if the queue file does
    /// not exist. Unlike the snapshot, a corrupt queue line is an error:
    /// silently dropping it would lose an unconfirmed user edit.
    pub fn get_queue(&self) -> Result<Vec<PendingOp>> {
        let file = match File::open(self.queue_path()) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut ops = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let op: PendingOp = serde_json::from_str(&line)
                .map_err(|e| Error::CorruptedQueue(format!("{e}: {line}")))?;
            ops.push(op);
        }

        Ok(ops)
    }

    /// Appends an operation to the queue.
    ///
    /// The operation is immediately persisted and fsynced.
    pub fn append_op(&self, op: &PendingOp) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.queue_path())?;

        let json = serde_json::to_string(op)?;
        writeln!(file, "{json}")?;
        file.sync_all()?;

        Ok(())
    }

    /// Clears all queued operations.
    ///
    /// Called only after a replay pass completes with every op confirmed.
    pub fn clear_queue(&self) -> Result<()> {
        // Truncate the file
        File::create(self.queue_path())?;
        Ok(())
    }

    /// Returns the number of queued operations.
    pub fn queue_len(&self) -> Result<usize> {
        Ok(self.get_queue()?.len())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
