// SPDX-License-Identifier: MIT

//! ot-core: Shared library for the offtask offline task client.
//!
//! This crate provides the data model, the pending-operation type, and
//! the durable store used by the offtask client crate. It is fully
//! synchronous and has no network dependencies.

pub mod error;
pub mod op;
pub mod session;
pub mod store;
pub mod task;

pub use error::{Error, Result};
pub use op::PendingOp;
pub use session::{Session, User};
pub use store::Store;
pub use task::{local_task_id, Status, Task, LOCAL_ID_PREFIX};
