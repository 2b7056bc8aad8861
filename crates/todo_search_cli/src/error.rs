//! Errors surfaced by `todo-search` commands.

use std::error::Error;
use std::fmt::{Display, Formatter};

use todo_search_core::db::DbError;
use todo_search_core::{RepoError, SeedError, TodoId};

#[derive(Debug)]
pub enum CliError {
    Logging(String),
    Db(DbError),
    Repo(RepoError),
    Seed(SeedError),
    NotFound(TodoId),
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging: {message}"),
            Self::Db(err) => write!(f, "database: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Seed(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Json(err) => write!(f, "json output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) | Self::NotFound(_) => None,
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Seed(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<SeedError> for CliError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
