//! Domain model for searchable todo entries.
//!
//! # Invariants
//! - Every todo is identified by a store-assigned `TodoId`.
//! - Search paths only read todos; they never mutate them.

pub mod todo;
