//! Todo search semantics shared by every repository backend.
//!
//! # Responsibility
//! - Define the one substring predicate and ordering used by all search entry points.
//! - Render that predicate to SQL for SQLite and evaluate it in-process for memory stores.
//!
//! # Invariants
//! - A todo matches when its title or description contains the term, ASCII case folded.
//! - Every result order ends with `id ASC`, so equal sort keys stay deterministic.

pub mod query;
pub mod sort;
pub mod strategy;

pub use query::{fold_case, is_like_safe, like_pattern, SearchQuery, LIKE_PATTERN_MAX_BYTES};
pub use sort::{Direction, Order, ParseFieldError, Sort, TodoField};
pub use strategy::{ParseStrategyError, SearchStrategy};
