//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and search over the `todos` table.
//! - Keep every SQL statement inside the persistence boundary.
//!
//! # Invariants
//! - Writes call `validate()` before touching SQL.
//! - Search paths are read-only and return the same rows for every strategy.
//! - Reads reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::todo::{NewTodo, Todo, TodoId, TodoValidationError};
use crate::repo::now_epoch_ms;
use crate::search::{is_like_safe, like_pattern, SearchQuery, SearchStrategy, Sort};
use log::debug;
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const TODO_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    created_at,
    modified_at
FROM todos";

const SEARCH_SORTED_IN_QUERY_SQL: &str = "SELECT id, title, description, created_at, modified_at
FROM todos
WHERE (lower(title) LIKE ?1 ESCAPE '\\' OR lower(description) LIKE ?1 ESCAPE '\\')
ORDER BY title ASC, id ASC";

/// Fixed-sort statement for terms a `LIKE` pattern cannot carry.
const SEARCH_SORTED_IN_QUERY_LITERAL_SQL: &str = "SELECT id, title, description, created_at, modified_at
FROM todos
WHERE (instr(lower(title), lower(?1)) > 0 OR instr(lower(description), lower(?1)) > 0)
ORDER BY title ASC, id ASC";

const SEARCH_NATIVE_SQL: &str = "SELECT t.id, t.title, t.description, t.created_at, t.modified_at
FROM todos AS t
WHERE instr(lower(t.title), lower(?1)) > 0
   OR instr(lower(t.description), lower(?1)) > 0
ORDER BY t.title ASC, t.id ASC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence and search.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoValidationError),
    Db(DbError),
    NotFound(TodoId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access contract for todo entries.
///
/// Implementors provide [`TodoRepository::search`]; the three named search
/// methods are thin entry points over it.
pub trait TodoRepository {
    fn create_todo(&self, todo: &NewTodo) -> RepoResult<TodoId>;
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    fn list_todos(&self, sort: &Sort) -> RepoResult<Vec<Todo>>;
    fn update_todo(&self, todo: &Todo) -> RepoResult<()>;
    fn delete_todo(&self, id: TodoId) -> RepoResult<()>;

    /// Returns every todo whose title or description contains `term`,
    /// ignoring ASCII case.
    ///
    /// `sort` is honored only by [`SearchStrategy::Derived`]; the other
    /// strategies always order by title ascending.
    fn search(&self, strategy: SearchStrategy, term: &str, sort: &Sort)
        -> RepoResult<Vec<Todo>>;

    /// Search with caller-supplied ordering.
    fn find_by_search_term(&self, term: &str, sort: &Sort) -> RepoResult<Vec<Todo>> {
        self.search(SearchStrategy::Derived, term, sort)
    }

    /// Search ordered by title ascending, fixed in the statement.
    fn find_by_search_term_sorted_in_query(&self, term: &str) -> RepoResult<Vec<Todo>> {
        self.search(SearchStrategy::SortedInQuery, term, &Sort::by_title_asc())
    }

    /// Search through a backend-native statement, ordered by title ascending.
    fn find_by_search_term_native(&self, term: &str) -> RepoResult<Vec<Todo>> {
        self.search(SearchStrategy::Native, term, &Sort::by_title_asc())
    }
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_todos<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Todo>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, todo: &NewTodo) -> RepoResult<TodoId> {
        todo.validate()?;

        let now = now_epoch_ms();
        self.conn.execute(
            "INSERT INTO todos (title, description, created_at, modified_at)
             VALUES (?1, ?2, ?3, ?3);",
            params![todo.title.as_str(), todo.description.as_deref(), now],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        let todos = self.query_todos(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(todos.into_iter().next())
    }

    fn list_todos(&self, sort: &Sort) -> RepoResult<Vec<Todo>> {
        self.query_todos(&format!("{TODO_SELECT_SQL}{}", sort.order_by_sql()), [])
    }

    fn update_todo(&self, todo: &Todo) -> RepoResult<()> {
        todo.validate()?;

        let changed = self.conn.execute(
            "UPDATE todos
             SET
                title = ?1,
                description = ?2,
                modified_at = ?3
             WHERE id = ?4;",
            params![
                todo.title.as_str(),
                todo.description.as_deref(),
                now_epoch_ms(),
                todo.id
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(todo.id));
        }

        Ok(())
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM todos WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn search(
        &self,
        strategy: SearchStrategy,
        term: &str,
        sort: &Sort,
    ) -> RepoResult<Vec<Todo>> {
        let started_at = Instant::now();

        let todos = match strategy {
            SearchStrategy::Derived => {
                let query = SearchQuery::new(term).with_sort(sort.clone());
                self.query_todos(
                    &format!("{TODO_SELECT_SQL}{}", query.sql_clause()),
                    [query.bind_value()],
                )?
            }
            SearchStrategy::SortedInQuery if is_like_safe(term) => {
                self.query_todos(SEARCH_SORTED_IN_QUERY_SQL, [like_pattern(term)])?
            }
            SearchStrategy::SortedInQuery => {
                self.query_todos(SEARCH_SORTED_IN_QUERY_LITERAL_SQL, [term])?
            }
            SearchStrategy::Native => self.query_todos(SEARCH_NATIVE_SQL, [term])?,
        };

        debug!(
            "event=todo_search module=repo status=ok backend=sqlite strategy={} term_chars={} result_count={} duration_ms={}",
            strategy,
            term.chars().count(),
            todos.len(),
            started_at.elapsed().as_millis()
        );
        Ok(todos)
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let todo = Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        modified_at: row.get(4)?,
    };

    todo.validate()
        .map_err(|err| RepoError::InvalidData(format!("todos.id={}: {err}", todo.id)))?;
    Ok(todo)
}
