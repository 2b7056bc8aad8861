//! Declarative todo search: a term plus an ordering.
//!
//! # Responsibility
//! - Hold the substring predicate in one place.
//! - Render it to a SQL clause or evaluate it against in-memory rows.
//!
//! # Invariants
//! - The term is literal text. `%`, `_` and `\` never act as wildcards.
//! - Case folding is ASCII-only, the same as SQLite `lower()`.
//! - Terms that `LIKE` cannot express (NUL bytes, patterns over SQLite's
//!   length cap) are rendered with `instr` instead, so every term succeeds.

use super::sort::Sort;
use crate::model::todo::Todo;

/// Escape character declared in every rendered `LIKE` clause.
pub const LIKE_ESCAPE: char = '\\';

/// SQLite's default and compile-time maximum `SQLITE_LIMIT_LIKE_PATTERN_LENGTH`.
pub const LIKE_PATTERN_MAX_BYTES: usize = 50_000;

/// Substring predicate over both text columns.
/// `?1` binds the output of [`like_pattern`].
const LIKE_MATCH_SQL: &str =
    " WHERE (lower(title) LIKE ?1 ESCAPE '\\' OR lower(description) LIKE ?1 ESCAPE '\\')";

/// Same predicate for terms `LIKE` cannot take. `?1` binds the raw term.
const INSTR_MATCH_SQL: &str =
    " WHERE (instr(lower(title), lower(?1)) > 0 OR instr(lower(description), lower(?1)) > 0)";

/// A search term with the ordering to apply to its matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub sort: Sort,
}

impl SearchQuery {
    /// Creates an unsorted query; matches come back by ascending id.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            sort: Sort::unsorted(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Renders the `WHERE ... ORDER BY ...` tail of a `SELECT` over `todos`.
    pub fn sql_clause(&self) -> String {
        let predicate = if is_like_safe(&self.term) {
            LIKE_MATCH_SQL
        } else {
            INSTR_MATCH_SQL
        };
        format!("{predicate}{}", self.sort.order_by_sql())
    }

    /// Value bound to `?1` of [`SearchQuery::sql_clause`].
    pub fn bind_value(&self) -> String {
        if is_like_safe(&self.term) {
            like_pattern(&self.term)
        } else {
            self.term.clone()
        }
    }

    /// Whether `todo` satisfies the predicate.
    pub fn matches(&self, todo: &Todo) -> bool {
        let needle = fold_case(&self.term);
        fold_case(&todo.title).contains(&needle)
            || todo
                .description
                .as_deref()
                .is_some_and(|description| fold_case(description).contains(&needle))
    }

    /// Filters and orders rows in-process.
    pub fn apply<'a>(&self, todos: impl IntoIterator<Item = &'a Todo>) -> Vec<Todo> {
        let mut matches = todos
            .into_iter()
            .filter(|todo| self.matches(todo))
            .cloned()
            .collect::<Vec<_>>();
        matches.sort_by(|left, right| self.sort.compare(left, right));
        matches
    }
}

pub fn fold_case(value: &str) -> String {
    value.to_ascii_lowercase()
}

/// Whether `term` can be bound as a [`like_pattern`].
///
/// SQLite stops reading a `LIKE` pattern at NUL and rejects patterns longer
/// than [`LIKE_PATTERN_MAX_BYTES`].
pub fn is_like_safe(term: &str) -> bool {
    !term.contains('\0') && like_pattern_len(term) <= LIKE_PATTERN_MAX_BYTES
}

fn like_pattern_len(term: &str) -> usize {
    let escapes = term
        .bytes()
        .filter(|&byte| matches!(byte, b'%' | b'_' | b'\\'))
        .count();
    term.len() + escapes + 2
}

/// Builds `%<term>%` with `LIKE` metacharacters escaped and ASCII folded.
pub fn like_pattern(term: &str) -> String {
    let folded = fold_case(term);
    let mut pattern = String::with_capacity(folded.len() + 2);
    pattern.push('%');
    for ch in folded.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
