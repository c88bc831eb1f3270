// SPDX-License-Identifier: MIT

//! Remote service contract and HTTP implementation.
//!
//! The remote service is an opaque collaborator with four operations:
//! authenticate, list tasks, update task, create task. The [`Remote`]
//! trait abstracts over the actual transport so tests can inject mock
//! implementations; [`HttpRemote`] is the production client.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use ot_core::{Status, Task, User};

/// Boxed future returned by [`Remote`] methods.
pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = RemoteResult<T>> + Send + 'a>>;

/// Error type for remote service operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    /// The email/password pair was not recognized.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The targeted task is unknown to the service.
    #[error("task not found: {0}")]
    NotFound(String),

    /// Network unreachable, timeout, or server-side failure. Mutations
    /// failing with this are queued for later replay.
    #[error("remote service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with a payload we could not interpret.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Result type for remote service operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Response of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    /// Profile of the authenticated user.
    pub user: User,
}

/// Contract for the backing task service.
///
/// Every method may fail with a network or auth error; callers decide
/// whether to surface, queue, or fall back to cache.
pub trait Remote: Send + Sync {
    /// Exchange credentials for a token and user profile.
    ///
    /// Fails with [`RemoteError::InvalidCredentials`] when the pair is
    /// not recognized.
    fn authenticate<'a>(&'a self, email: &'a str, password: &'a str)
        -> RemoteFuture<'a, LoginResponse>;

    /// Fetch the authoritative task list.
    fn list_tasks(&self) -> RemoteFuture<'_, Vec<Task>>;

    /// Update status and remarks of a task.
    ///
    /// Fails with [`RemoteError::NotFound`] when `task_id` is unknown to
    /// the service (including local placeholder ids it never learned of).
    fn update_task<'a>(
        &'a self,
        task_id: &'a str,
        status: Status,
        remarks: Option<String>,
    ) -> RemoteFuture<'a, Task>;

    /// Create a task. The service assigns the canonical identifier,
    /// distinct from any locally generated one.
    fn create_task<'a>(&'a self, title: &'a str, description: &'a str) -> RemoteFuture<'a, Task>;
}

impl<T: Remote + ?Sized> Remote for Arc<T> {
    fn authenticate<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> RemoteFuture<'a, LoginResponse> {
        (**self).authenticate(email, password)
    }

    fn list_tasks(&self) -> RemoteFuture<'_, Vec<Task>> {
        (**self).list_tasks()
    }

    fn update_task<'a>(
        &'a self,
        task_id: &'a str,
        status: Status,
        remarks: Option<String>,
    ) -> RemoteFuture<'a, Task> {
        (**self).update_task(task_id, status, remarks)
    }

    fn create_task<'a>(&'a self, title: &'a str, description: &'a str) -> RemoteFuture<'a, Task> {
        (**self).create_task(title, description)
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct UpdateBody {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    remarks: Option<String>,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    title: &'a str,
    description: &'a str,
}

/// Maps a non-success HTTP status to the remote error taxonomy.
///
/// Returns `None` for success statuses.
pub(crate) fn classify_status(status: StatusCode, target: &str) -> Option<RemoteError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Some(RemoteError::InvalidCredentials)
    } else if status == StatusCode::NOT_FOUND {
        Some(RemoteError::NotFound(target.to_string()))
    } else if !status.is_success() {
        Some(RemoteError::Unavailable(format!("server returned {status}")))
    } else {
        None
    }
}

/// HTTP client for the backing task service.
///
/// Holds the bearer token internally: a successful [`authenticate`]
/// call records the returned token, and a host restoring a persisted
/// session installs it with [`set_token`] before issuing requests.
///
/// [`authenticate`]: Remote::authenticate
/// [`set_token`]: HttpRemote::set_token
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpRemote {
    /// Creates a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpRemote {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    /// Installs a bearer token, e.g. from a restored session.
    pub fn set_token(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        }
    }

    /// Drops the bearer token on logout.
    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    fn bearer(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        target: &str,
    ) -> RemoteResult<T> {
        let req = match self.bearer() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let resp = req
            .send()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;

        if let Some(err) = classify_status(resp.status(), target) {
            return Err(err);
        }

        resp.json()
            .await
            .map_err(|e| RemoteError::Protocol(e.to_string()))
    }
}

impl Remote for HttpRemote {
    fn authenticate<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> RemoteFuture<'a, LoginResponse> {
        Box::pin(async move {
            let req = self
                .client
                .post(self.url("/auth/login"))
                .json(&LoginBody { email, password });

            let resp: LoginResponse = self.execute(req, "login").await?;
            self.set_token(&resp.token);
            Ok(resp)
        })
    }

    fn list_tasks(&self) -> RemoteFuture<'_, Vec<Task>> {
        Box::pin(async move {
            let req = self.client.get(self.url("/tasks"));
            self.execute(req, "tasks").await
        })
    }

    fn update_task<'a>(
        &'a self,
        task_id: &'a str,
        status: Status,
        remarks: Option<String>,
    ) -> RemoteFuture<'a, Task> {
        Box::pin(async move {
            let req = self
                .client
                .patch(self.url(&format!("/tasks/{task_id}")))
                .json(&UpdateBody { status, remarks });
            self.execute(req, task_id).await
        })
    }

    fn create_task<'a>(&'a self, title: &'a str, description: &'a str) -> RemoteFuture<'a, Task> {
        Box::pin(async move {
            let req = self
                .client
                .post(self.url("/tasks"))
                .json(&CreateBody { title, description });
            self.execute(req, "tasks").await
        })
    }
}
