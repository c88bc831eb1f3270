// SPDX-License-Identifier: MIT

//! Sync engine: owns the pending-operation queue and replays it against
//! the remote service when connectivity returns.
//!
//! Replay is strictly FIFO and all-or-nothing per pass: the first
//! failing operation aborts the pass with the failed and untried
//! operations still queued, in order, for the next attempt. The queue is
//! cleared only after a pass in which every operation was confirmed.
//!
//! Per-pass all-or-nothing (rather than per-operation removal) keeps the
//! queue consistent with dependency ordering: removing a confirmed
//! `AddTask` while a dependent `UpdateTask` still references its local
//! placeholder id would strand the update. Note the converse limitation:
//! a replayed `AddTask` does not rewrite later queued updates from the
//! local id to the server-assigned id, so such an update is sent with
//! the local id and rejected as not-found.
//!
//! Only one pass runs at a time, guarded by a checked-then-set in-flight
//! flag; a replay triggered while one is running is a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use ot_core::{PendingOp, Result, Store};

use crate::remote::{Remote, RemoteError};

/// Result of one replay attempt.
#[derive(Debug)]
pub enum SyncOutcome {
    /// The queue was empty; nothing was marked syncing, no remote calls
    /// were made, and `last_synced` is unchanged.
    QueueEmpty,
    /// Another pass was already running; this attempt was a no-op.
    AlreadyInFlight,
    /// An operation failed. `attempted` operations were called (the last
    /// of them unsuccessfully); the queue is untouched.
    Failed {
        attempted: usize,
        error: RemoteError,
    },
    /// Every queued operation was confirmed; the queue is cleared and
    /// `last_synced` advanced.
    Synced { replayed: usize },
}

/// RAII guard for the in-flight flag; releases on drop so an aborted
/// pass never wedges future syncs.
struct Pass {
    flag: Arc<AtomicBool>,
}

impl Pass {
    fn begin(flag: &Arc<AtomicBool>) -> Option<Pass> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        Some(Pass { flag: flag.clone() })
    }
}

impl Drop for Pass {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Owns the pending-operation queue and the replay algorithm.
pub struct SyncEngine {
    store: Store,
    in_flight: Arc<AtomicBool>,
    last_synced: Mutex<Option<DateTime<Utc>>>,
}

impl SyncEngine {
    /// Creates an engine over the given store.
    pub fn new(store: Store) -> Self {
        SyncEngine {
            store,
            in_flight: Arc::new(AtomicBool::new(false)),
            last_synced: Mutex::new(None),
        }
    }

    /// The underlying persistent store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// True while a replay pass is running. Observable sync state for
    /// UI feedback.
    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Time of the last fully successful sync, if any.
    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.last_synced.lock().ok().and_then(|guard| *guard)
    }

    /// Records a successful reconciliation with the server, e.g. after a
    /// direct task-list fetch.
    pub fn mark_synced(&self, at: DateTime<Utc>) {
        if let Ok(mut guard) = self.last_synced.lock() {
            *guard = Some(at);
        }
    }

    /// Appends a failed mutation to the persisted queue.
    pub fn enqueue(&self, op: PendingOp) -> Result<()> {
        tracing::debug!(op = ?op, "queueing operation for later sync");
        self.store.append_op(&op)
    }

    /// Number of operations awaiting replay.
    pub fn pending_count(&self) -> Result<usize> {
        self.store.queue_len()
    }

    /// Replays the queue against the remote service.
    ///
    /// Store failures are returned as errors; a remote failure is an
    /// expected outcome ([`SyncOutcome::Failed`]) and leaves the queue
    /// intact for the next attempt.
    pub async fn replay<R: Remote + ?Sized>(&self, remote: &R) -> Result<SyncOutcome> {
        if self.store.queue_len()? == 0 {
            return Ok(SyncOutcome::QueueEmpty);
        }

        let Some(_pass) = Pass::begin(&self.in_flight) else {
            tracing::debug!("replay already in flight, skipping");
            return Ok(SyncOutcome::AlreadyInFlight);
        };

        // Read under the guard: a snapshot taken before acquisition could
        // predate another pass's clear.
        let queue = self.store.get_queue()?;
        if queue.is_empty() {
            return Ok(SyncOutcome::QueueEmpty);
        }

        tracing::info!(ops = queue.len(), "replaying offline queue");

        for (index, op) in queue.iter().enumerate() {
            let result = match op {
                PendingOp::AddTask {
                    title, description, ..
                } => remote.create_task(title, description).await.map(|_| ()),
                PendingOp::UpdateTask {
                    task_id,
                    status,
                    remarks,
                } => remote
                    .update_task(task_id, *status, remarks.clone())
                    .await
                    .map(|_| ()),
            };

            if let Err(error) = result {
                tracing::warn!(
                    op = index + 1,
                    total = queue.len(),
                    %error,
                    "replay aborted, queue retained"
                );
                return Ok(SyncOutcome::Failed {
                    attempted: index + 1,
                    error,
                });
            }
        }

        self.store.clear_queue()?;
        self.mark_synced(Utc::now());
        tracing::info!(ops = queue.len(), "offline queue replayed");

        Ok(SyncOutcome::Synced {
            replayed: queue.len(),
        })
    }
}
