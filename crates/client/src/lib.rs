// SPDX-License-Identifier: MIT

//! offtask: offline-first task client library.
//!
//! Implements the synchronization subsystem of a mobile task-management
//! client: authentication, an optimistically edited task list, a durable
//! pending-operation queue, and the reconciliation pass that replays
//! queued operations when connectivity returns. Screen rendering and
//! navigation are the embedding UI shell's concern; this crate exposes
//! the state the UI observes and the operations it invokes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  AppState    │────►│   Remote    │────►│   Service   │
//! │ (controller) │     │   (trait)   │     │  (HTTP API) │
//! └──────┬───────┘     └─────────────┘     └─────────────┘
//!        │ failed mutations
//!        ▼
//! ┌──────────────┐     ┌─────────────┐
//! │  SyncEngine  │────►│    Store    │  (token, snapshot, queue)
//! │ (FIFO replay)│     │  (ot-core)  │
//! └──────▲───────┘     └─────────────┘
//!        │ online events
//! ┌──────┴───────────────┐
//! │ ConnectivityMonitor  │
//! └──────────────────────┘
//! ```
//!
//! # Guarantees
//!
//! - Optimistic edits are visible and persisted before any network
//!   attempt.
//! - Queue replay is strictly FIFO and all-or-nothing per pass.
//! - Only one replay pass runs at a time.
//! - Every failure path leaves the client usable and locally consistent.

mod app;
mod connectivity;
mod remote;
mod sync;

pub use app::{AppError, AppResult, AppState, Notice};
pub use connectivity::{ConnectivityEvent, ConnectivityMonitor, Subscription};
pub use remote::{HttpRemote, LoginResponse, Remote, RemoteError, RemoteFuture, RemoteResult};
pub use sync::{SyncEngine, SyncOutcome};

#[cfg(test)]
mod test_helpers;
