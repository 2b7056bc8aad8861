//! Repository layer: data access contracts and their implementations.
//!
//! # Responsibility
//! - Define the todo data access contract, including the search entry points.
//! - Isolate SQLite statements from the service layer.
//!
//! # Invariants
//! - Every implementation returns identical rows and order for the same search.
//! - `NotFound` is reported for writes that target a missing id.

pub mod memory_repo;
pub mod todo_repo;

use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock Unix epoch milliseconds used for `created_at`/`modified_at`.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
