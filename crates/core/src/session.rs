// SPDX-License-Identifier: MIT

//! Authenticated session types.

use serde::{Deserialize, Serialize};

/// Profile of the authenticated user as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// An authenticated session.
///
/// Only the token survives a restart (the store persists nothing else),
/// so a session restored at startup has no user profile until the next
/// successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token issued by the remote service.
    pub token: String,
    /// User profile; `None` when restored from the persisted token alone.
    pub user: Option<User>,
}

impl Session {
    /// Creates a session from a fresh login response.
    pub fn new(token: String, user: User) -> Self {
        Session {
            token,
            user: Some(user),
        }
    }

    /// Creates a session restored from a persisted token.
    pub fn restored(token: String) -> Self {
        Session { token, user: None }
    }
}
