//! Core data access for searchable todo entries.
//! This crate owns the search semantics and every SQL statement.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod seed;
pub mod service;

pub use logging::{init_logging, logging_status, LogLevel};
pub use model::todo::{NewTodo, Todo, TodoId, TodoValidationError};
pub use repo::memory_repo::InMemoryTodoRepository;
pub use repo::todo_repo::{RepoError, RepoResult, SqliteTodoRepository, TodoRepository};
pub use search::{Direction, Order, SearchQuery, SearchStrategy, Sort, TodoField};
pub use seed::{Dataset, SeedError, SeedLoader, SeedResult, SeedTodo};
pub use service::todo_service::TodoService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
