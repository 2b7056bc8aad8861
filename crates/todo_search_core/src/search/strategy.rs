//! Names for the interchangeable ways a search can be expressed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How a search statement is built before it reaches the store.
///
/// All strategies return the same rows; they differ only in where the
/// ordering comes from and how the predicate is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStrategy {
    /// Predicate rendered from a [`SearchQuery`](super::SearchQuery); ordering comes from the caller.
    Derived,
    /// Fixed statement text with `ORDER BY title ASC` embedded.
    SortedInQuery,
    /// Hand-written backend statement using SQLite `instr`, ordered by title.
    Native,
}

impl SearchStrategy {
    pub const ALL: [Self; 3] = [Self::Derived, Self::SortedInQuery, Self::Native];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Derived => "derived",
            Self::SortedInQuery => "sorted-in-query",
            Self::Native => "native",
        }
    }

    /// Whether the caller-supplied sort is honored.
    pub fn uses_caller_sort(self) -> bool {
        matches!(self, Self::Derived)
    }
}

impl Display for SearchStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(String);

impl Display for ParseStrategyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown search strategy `{}`; expected derived|sorted-in-query|native",
            self.0
        )
    }
}

impl Error for ParseStrategyError {}

impl FromStr for SearchStrategy {
    type Err = ParseStrategyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "derived" => Ok(Self::Derived),
            "sorted-in-query" => Ok(Self::SortedInQuery),
            "native" => Ok(Self::Native),
            _ => Err(ParseStrategyError(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SearchStrategy;

    #[test]
    fn parses_display_names_and_snake_case() {
        for strategy in SearchStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<SearchStrategy>(), Ok(strategy));
        }
        assert_eq!(
            "sorted_in_query".parse::<SearchStrategy>(),
            Ok(SearchStrategy::SortedInQuery)
        );
        assert!("fulltext".parse::<SearchStrategy>().is_err());
    }
}
