// SPDX-License-Identifier: MIT

//! Application state controller.
//!
//! Single source of truth observed by the UI layer: session, task list,
//! and the latest user-facing notice. Mutations apply optimistically
//! (in memory and in the persisted snapshot) before the remote call is
//! attempted, so the UI never waits on a network round-trip to see its
//! own edits; failed mutations are handed to the sync engine's queue.
//!
//! The controller is an explicit state container owned by the
//! composition root and passed to UI components, never a process-wide
//! singleton.

use std::fmt;

use chrono::Utc;

use ot_core::{local_task_id, PendingOp, Session, Status, Task};

use crate::remote::{Remote, RemoteError};
use crate::sync::{SyncEngine, SyncOutcome};

/// User-facing status message set by failure and sync paths.
///
/// The UI only displays the rendered string; it never interprets codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A task-list fetch failed and the cached snapshot was shown.
    LoadedFromCache,
    /// A status/remarks edit could not reach the server and was queued.
    UpdateSavedOffline,
    /// A new task could not reach the server and was queued.
    TaskSavedOffline,
    /// A replay pass confirmed every queued operation.
    SyncComplete,
    /// A replay pass failed; the queue is retained for the next attempt.
    SyncFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Notice::LoadedFromCache => "Loaded from cache",
            Notice::UpdateSavedOffline => "Update saved offline. Will sync later.",
            Notice::TaskSavedOffline => "Task added offline. Will sync later.",
            Notice::SyncComplete => "Synced successfully!",
            Notice::SyncFailed => "Sync failed. Will retry later.",
        };
        write!(f, "{msg}")
    }
}

/// Error type for controller operations.
///
/// Remote errors surface here only from non-recoverable paths (bad
/// credentials on login); mutation and read failures recover locally
/// via queueing or cache fallback and set a [`Notice`] instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] ot_core::Error),
}

/// Result type for controller operations.
pub type AppResult<T> = Result<T, AppError>;

/// Orchestrates authentication, task list state, and offline mutations.
pub struct AppState<R: Remote> {
    remote: R,
    engine: SyncEngine,
    session: Option<Session>,
    tasks: Vec<Task>,
    notice: Option<Notice>,
}

impl<R: Remote> AppState<R> {
    /// Creates a controller over the given remote and sync engine.
    pub fn new(remote: R, engine: SyncEngine) -> Self {
        AppState {
            remote,
            engine,
            session: None,
            tasks: Vec::new(),
            notice: None,
        }
    }

    /// The current session, if authenticated.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The in-memory task list, reflecting all confirmed and pending
    /// local edits.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The latest user-facing notice, if any.
    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// The sync engine, for observable sync state (in-flight flag,
    /// last-synced timestamp, pending count).
    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    /// Authenticates against the remote service.
    ///
    /// On success the token is persisted, the session replaced, and any
    /// stale task list (memory and snapshot) cleared. On failure the
    /// error is returned and no state changes.
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<()> {
        let resp = self.remote.authenticate(email, password).await?;

        self.engine.store().set_token(&resp.token)?;
        // A fresh login starts from a clean list; a cached snapshot from
        // another account must not leak through.
        self.engine.store().set_tasks(&[])?;
        self.session = Some(Session::new(resp.token, resp.user));
        self.tasks.clear();
        self.notice = None;

        tracing::info!(email, "logged in");
        Ok(())
    }

    /// Ends the session and removes the persisted token.
    ///
    /// The task snapshot is retained; it belongs to the cache, not the
    /// session.
    pub fn logout(&mut self) -> AppResult<()> {
        self.engine.store().remove_token()?;
        self.session = None;
        self.tasks.clear();
        self.notice = None;
        tracing::info!("logged out");
        Ok(())
    }

    /// Restores a session from the persisted token at startup.
    ///
    /// Returns true if a token was found. The restored session carries
    /// no user profile; that arrives with the next login.
    pub fn restore_session(&mut self) -> AppResult<bool> {
        match self.engine.store().get_token()? {
            Some(token) => {
                self.session = Some(Session::restored(token));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fetches the task list, falling back to the cached snapshot.
    ///
    /// On success the snapshot is overwritten and the last-synced
    /// timestamp advanced. On remote failure the snapshot is loaded
    /// instead and a [`Notice::LoadedFromCache`] set; this path is
    /// non-fatal.
    pub async fn fetch_tasks(&mut self) -> AppResult<()> {
        match self.remote.list_tasks().await {
            Ok(tasks) => {
                self.engine.store().set_tasks(&tasks)?;
                self.engine.mark_synced(Utc::now());
                self.tasks = tasks;
                self.notice = None;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "task fetch failed, loading cached snapshot");
                self.tasks = self.engine.store().get_tasks()?;
                self.notice = Some(Notice::LoadedFromCache);
                Ok(())
            }
        }
    }

    /// Updates a task's status and remarks.
    ///
    /// The edit is applied to the in-memory list and persisted snapshot
    /// immediately; the remote call follows. Any remote failure queues
    /// the operation, so the user-visible effect is identical with or
    /// without connectivity.
    pub async fn update_task(
        &mut self,
        task_id: &str,
        status: Status,
        remarks: Option<String>,
    ) -> AppResult<()> {
        let now = Utc::now();
        for task in &mut self.tasks {
            if task.id == task_id {
                task.status = status;
                task.remarks = remarks.clone();
                task.last_updated = now;
            }
        }
        self.engine.store().set_tasks(&self.tasks)?;

        match self.remote.update_task(task_id, status, remarks.clone()).await {
            Ok(_) => {
                self.notice = None;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(task_id, %error, "update failed, saved offline");
                self.engine
                    .enqueue(PendingOp::update_task(task_id.to_string(), status, remarks))?;
                self.notice = Some(Notice::UpdateSavedOffline);
                Ok(())
            }
        }
    }

    /// Creates a task.
    ///
    /// A placeholder with a local identifier is prepended and persisted
    /// first. On remote success the canonical server task replaces the
    /// placeholder; on failure the creation is queued with the local id
    /// recorded for correlation.
    pub async fn add_task(&mut self, title: &str, description: &str) -> AppResult<()> {
        let local_id = local_task_id(Utc::now());
        let placeholder = Task::new(local_id.clone(), title.to_string(), description.to_string());
        self.tasks.insert(0, placeholder);
        self.engine.store().set_tasks(&self.tasks)?;

        match self.remote.create_task(title, description).await {
            Ok(created) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == local_id) {
                    *slot = created;
                }
                self.engine.store().set_tasks(&self.tasks)?;
                self.notice = None;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%local_id, %error, "create failed, saved offline");
                self.engine.enqueue(PendingOp::add_task(
                    title.to_string(),
                    description.to_string(),
                    local_id,
                ))?;
                self.notice = Some(Notice::TaskSavedOffline);
                Ok(())
            }
        }
    }

    /// Replays the offline queue and, on success, refreshes the task
    /// list from the server's authoritative state.
    pub async fn trigger_sync(&mut self) -> AppResult<SyncOutcome> {
        let outcome = self.engine.replay(&self.remote).await?;

        match outcome {
            SyncOutcome::Synced { .. } => {
                self.fetch_tasks().await?;
                self.notice = Some(Notice::SyncComplete);
            }
            SyncOutcome::Failed { .. } => {
                self.notice = Some(Notice::SyncFailed);
            }
            SyncOutcome::QueueEmpty | SyncOutcome::AlreadyInFlight => {}
        }

        Ok(outcome)
    }
}
