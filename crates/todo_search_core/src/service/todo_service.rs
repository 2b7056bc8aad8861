//! Todo use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Service layer stays storage-agnostic.

use crate::model::todo::{NewTodo, Todo, TodoId};
use crate::repo::todo_repo::{RepoResult, TodoRepository};
use crate::search::{SearchStrategy, Sort};

/// Use-case wrapper over any [`TodoRepository`].
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a todo from raw input and returns its id.
    ///
    /// # Contract
    /// - Title is trimmed before validation.
    /// - A blank description is stored as `None`.
    pub fn add_todo(&self, title: &str, description: Option<&str>) -> RepoResult<TodoId> {
        let mut todo = NewTodo::new(title.trim());
        if let Some(description) = description.map(str::trim).filter(|text| !text.is_empty()) {
            todo = todo.with_description(description);
        }
        self.repo.create_todo(&todo)
    }

    pub fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.repo.get_todo(id)
    }

    pub fn list_todos(&self, sort: &Sort) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos(sort)
    }

    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_todo(&self, todo: &Todo) -> RepoResult<()> {
        self.repo.update_todo(todo)
    }

    pub fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        self.repo.delete_todo(id)
    }

    /// Runs a search with an explicit strategy.
    pub fn search(
        &self,
        strategy: SearchStrategy,
        term: &str,
        sort: &Sort,
    ) -> RepoResult<Vec<Todo>> {
        self.repo.search(strategy, term, sort)
    }

    pub fn find_by_search_term(&self, term: &str, sort: &Sort) -> RepoResult<Vec<Todo>> {
        self.repo.find_by_search_term(term, sort)
    }

    pub fn find_by_search_term_sorted_in_query(&self, term: &str) -> RepoResult<Vec<Todo>> {
        self.repo.find_by_search_term_sorted_in_query(term)
    }

    pub fn find_by_search_term_native(&self, term: &str) -> RepoResult<Vec<Todo>> {
        self.repo.find_by_search_term_native(term)
    }
}
