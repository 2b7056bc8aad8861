//! Seed-data loading for known table states.
//!
//! # Responsibility
//! - Parse JSON datasets describing the exact rows of `todos`.
//! - Replace the table contents with a dataset in one transaction.
//!
//! # Invariants
//! - Seeding is clean-insert: after success the table holds exactly the dataset rows.
//! - A dataset that fails validation is rejected before any row is written.
//!
//! Dataset shape:
//!
//! ```json
//! { "todos": [ { "id": 1, "title": "Write the title", "description": null } ] }
//! ```

use crate::db::DbError;
use crate::model::todo::{Todo, TodoId};
use log::{error, info};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

/// Timestamp used for seeded rows that omit one.
pub const DEFAULT_SEED_EPOCH_MS: i64 = 0;

pub type SeedResult<T> = Result<T, SeedError>;

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidDataset(String),
    Db(DbError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read dataset: {err}"),
            Self::Parse(err) => write!(f, "failed to parse dataset: {err}"),
            Self::InvalidDataset(message) => write!(f, "invalid dataset: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidDataset(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SeedError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<rusqlite::Error> for SeedError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Something that can put a connection into a known row state.
pub trait SeedLoader {
    /// Seeds `conn` and returns the number of rows written.
    fn seed(&self, conn: &mut Connection) -> SeedResult<usize>;
}

/// One dataset row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTodo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub modified_at: Option<i64>,
}

impl SeedTodo {
    pub fn to_todo(&self) -> Todo {
        let created_at = self.created_at.unwrap_or(DEFAULT_SEED_EPOCH_MS);
        Todo {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            created_at,
            modified_at: self.modified_at.unwrap_or(created_at),
        }
    }
}

/// Literal row set for the `todos` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub todos: Vec<SeedTodo>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> SeedResult<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SeedResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Dataset rows as entities, in dataset order.
    pub fn to_todos(&self) -> Vec<Todo> {
        self.todos.iter().map(SeedTodo::to_todo).collect()
    }

    /// Rejects duplicate ids and rows that would fail entity validation.
    pub fn validate(&self) -> SeedResult<()> {
        let mut seen = HashSet::with_capacity(self.todos.len());
        for row in &self.todos {
            if !seen.insert(row.id) {
                return Err(SeedError::InvalidDataset(format!(
                    "duplicate todo id {}",
                    row.id
                )));
            }
            row.to_todo().validate().map_err(|err| {
                SeedError::InvalidDataset(format!("todo id {}: {err}", row.id))
            })?;
        }
        Ok(())
    }
}

impl SeedLoader for Dataset {
    fn seed(&self, conn: &mut Connection) -> SeedResult<usize> {
        let started_at = Instant::now();
        self.validate()?;

        match clean_insert(conn, self) {
            Ok(count) => {
                info!(
                    "event=seed_load module=seed status=ok rows={count} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(count)
            }
            Err(err) => {
                error!(
                    "event=seed_load module=seed status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

fn clean_insert(conn: &mut Connection, dataset: &Dataset) -> SeedResult<usize> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM todos;", [])?;
    tx.execute("DELETE FROM sqlite_sequence WHERE name = 'todos';", [])?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO todos (id, title, description, created_at, modified_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
        )?;
        for todo in dataset.to_todos() {
            insert.execute(params![
                todo.id,
                todo.title,
                todo.description,
                todo.created_at,
                todo.modified_at,
            ])?;
        }
    }
    tx.commit()?;
    Ok(dataset.todos.len())
}
