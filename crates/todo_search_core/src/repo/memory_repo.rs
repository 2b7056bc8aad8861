//! In-process todo repository.
//!
//! Evaluates searches with [`SearchQuery`] directly, so it doubles as the
//! reference behavior the SQLite statements are checked against.

use crate::model::todo::{NewTodo, Todo, TodoId};
use crate::repo::now_epoch_ms;
use crate::repo::todo_repo::{RepoError, RepoResult, TodoRepository};
use crate::search::{SearchQuery, SearchStrategy, Sort};
use log::debug;
use std::cell::RefCell;

#[derive(Debug, Default)]
struct MemoryState {
    todos: Vec<Todo>,
    last_id: TodoId,
}

/// Vec-backed repository for tests and tooling without a database.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    state: RefCell<MemoryState>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store that already holds `todos` with their literal ids.
    ///
    /// New todos get ids above the largest seeded id.
    pub fn from_todos(todos: Vec<Todo>) -> Self {
        let last_id = todos.iter().map(|todo| todo.id).max().unwrap_or(0);
        Self {
            state: RefCell::new(MemoryState { todos, last_id }),
        }
    }

    pub fn len(&self) -> usize {
        self.state.borrow().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn create_todo(&self, todo: &NewTodo) -> RepoResult<TodoId> {
        todo.validate()?;

        let now = now_epoch_ms();
        let mut state = self.state.borrow_mut();
        state.last_id += 1;
        let id = state.last_id;
        state.todos.push(Todo {
            id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            created_at: now,
            modified_at: now,
        });

        Ok(id)
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        Ok(self
            .state
            .borrow()
            .todos
            .iter()
            .find(|todo| todo.id == id)
            .cloned())
    }

    fn list_todos(&self, sort: &Sort) -> RepoResult<Vec<Todo>> {
        let mut todos = self.state.borrow().todos.clone();
        todos.sort_by(|left, right| sort.compare(left, right));
        Ok(todos)
    }

    fn update_todo(&self, todo: &Todo) -> RepoResult<()> {
        todo.validate()?;

        let mut state = self.state.borrow_mut();
        let stored = state
            .todos
            .iter_mut()
            .find(|stored| stored.id == todo.id)
            .ok_or(RepoError::NotFound(todo.id))?;
        stored.title = todo.title.clone();
        stored.description = todo.description.clone();
        stored.modified_at = now_epoch_ms();

        Ok(())
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        let before = state.todos.len();
        state.todos.retain(|todo| todo.id != id);

        if state.todos.len() == before {
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
        let sort = if strategy.uses_caller_sort() {
            sort.clone()
        } else {
            Sort::by_title_asc()
        };
        let todos = SearchQuery::new(term)
            .with_sort(sort)
            .apply(&self.state.borrow().todos);

        debug!(
            "event=todo_search module=repo status=ok backend=memory strategy={} result_count={}",
            strategy,
            todos.len()
        );
        Ok(todos)
    }
}
