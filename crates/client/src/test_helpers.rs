// SPDX-License-Identifier: MIT

//! Shared test helpers for the client crate.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use ot_core::{Status, Task, User};

use crate::remote::{LoginResponse, Remote, RemoteError, RemoteFuture};

/// Credentials the mock service accepts.
pub const GOOD_EMAIL: &str = "test@example.com";
pub const GOOD_PASSWORD: &str = "password";
pub const MOCK_TOKEN: &str = "mock-jwt-token-123";

/// One recorded call against the mock service, for order assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    Authenticate {
        email: String,
    },
    ListTasks,
    UpdateTask {
        task_id: String,
        status: Status,
        remarks: Option<String>,
    },
    CreateTask {
        title: String,
    },
}

/// In-memory remote service double.
///
/// Serves a mutable task list, records every call, and flips between
/// online and offline. When offline, every operation fails with
/// `Unavailable`. An optional gate makes mutating calls wait on a
/// [`Notify`] so tests can hold a replay pass in flight.
pub struct MockRemote {
    online: AtomicBool,
    calls: Mutex<Vec<RemoteCall>>,
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicU64,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockRemote {
    pub fn new() -> Self {
        MockRemote {
            online: AtomicBool::new(true),
            calls: Mutex::new(Vec::new()),
            tasks: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            gate: Mutex::new(None),
        }
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let remote = Self::new();
        *remote.tasks.lock().unwrap() = tasks;
        remote
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Makes every mutating call wait for one `notify_one` before
    /// completing.
    pub fn gate_mutations(&self, gate: Arc<Notify>) {
        *self.gate.lock().unwrap() = Some(gate);
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn server_tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_online(&self) -> Result<(), RemoteError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RemoteError::Unavailable("network unreachable".into()))
        }
    }

    fn mutation_gate(&self) -> Option<Arc<Notify>> {
        self.gate.lock().unwrap().clone()
    }
}

impl Remote for MockRemote {
    fn authenticate<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> RemoteFuture<'a, LoginResponse> {
        Box::pin(async move {
            self.record(RemoteCall::Authenticate {
                email: email.to_string(),
            });
            self.check_online()?;

            if email == GOOD_EMAIL && password == GOOD_PASSWORD {
                Ok(LoginResponse {
                    token: MOCK_TOKEN.to_string(),
                    user: User {
                        id: "1".into(),
                        name: "Test User".into(),
                        email: email.to_string(),
                    },
                })
            } else {
                Err(RemoteError::InvalidCredentials)
            }
        })
    }

    fn list_tasks(&self) -> RemoteFuture<'_, Vec<Task>> {
        Box::pin(async move {
            self.record(RemoteCall::ListTasks);
            self.check_online()?;
            Ok(self.server_tasks())
        })
    }

    fn update_task<'a>(
        &'a self,
        task_id: &'a str,
        status: Status,
        remarks: Option<String>,
    ) -> RemoteFuture<'a, Task> {
        Box::pin(async move {
            self.record(RemoteCall::UpdateTask {
                task_id: task_id.to_string(),
                status,
                remarks: remarks.clone(),
            });
            self.check_online()?;

            if let Some(gate) = self.mutation_gate() {
                gate.notified().await;
            }

            let mut tasks = self.tasks.lock().unwrap();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == task_id)
                .ok_or_else(|| RemoteError::NotFound(task_id.to_string()))?;

            task.status = status;
            task.remarks = remarks;
            task.last_updated = chrono::Utc::now();
            Ok(task.clone())
        })
    }

    fn create_task<'a>(&'a self, title: &'a str, description: &'a str) -> RemoteFuture<'a, Task> {
        Box::pin(async move {
            self.record(RemoteCall::CreateTask {
                title: title.to_string(),
            });
            self.check_online()?;

            if let Some(gate) = self.mutation_gate() {
                gate.notified().await;
            }

            let id = format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            let task = Task::new(id, title.to_string(), description.to_string());
            self.tasks.lock().unwrap().insert(0, task.clone());
            Ok(task)
        })
    }
}

/// Server task fixture.
pub fn server_task(id: &str, title: &str) -> Task {
    Task::new(id.into(), title.into(), format!("{title} description"))
}
