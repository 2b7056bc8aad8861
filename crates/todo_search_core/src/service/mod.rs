//! Core use-case services.
//!
//! # Responsibility
//! - Turn repository calls into caller-facing use cases.
//! - Keep CLI and test callers independent of the storage backend.

pub mod todo_service;
