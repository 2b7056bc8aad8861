//! Todo entity and its creation payload.
//!
//! # Responsibility
//! - Define the record returned by repository reads and searches.
//! - Validate user-editable fields before they reach storage.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes.
//! - `title` is never blank.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
pub type TodoId = i64;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Persisted todo entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    /// `None` is stored as SQL `NULL` and never matches a search term.
    pub description: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds, bumped by every update.
    pub modified_at: i64,
}

/// Payload for creating a todo; the store fills in id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), TodoValidationError> {
        validate_fields(&self.title, self.description.as_deref())
    }
}

impl Todo {
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        validate_fields(&self.title, self.description.as_deref())
    }
}

/// Field-level validation failure for todo writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyTitle,
    TitleTooLong { chars: usize },
    DescriptionTooLong { chars: usize },
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "todo title cannot be empty"),
            Self::TitleTooLong { chars } => write!(
                f,
                "todo title has {chars} characters; at most {TITLE_MAX_CHARS} are allowed"
            ),
            Self::DescriptionTooLong { chars } => write!(
                f,
                "todo description has {chars} characters; at most {DESCRIPTION_MAX_CHARS} are allowed"
            ),
        }
    }
}

impl Error for TodoValidationError {}

fn validate_fields(title: &str, description: Option<&str>) -> Result<(), TodoValidationError> {
    if title.trim().is_empty() {
        return Err(TodoValidationError::EmptyTitle);
    }

    let title_chars = title.chars().count();
    if title_chars > TITLE_MAX_CHARS {
        return Err(TodoValidationError::TitleTooLong { chars: title_chars });
    }

    if let Some(description) = description {
        let chars = description.chars().count();
        if chars > DESCRIPTION_MAX_CHARS {
            return Err(TodoValidationError::DescriptionTooLong { chars });
        }
    }

    Ok(())
}
