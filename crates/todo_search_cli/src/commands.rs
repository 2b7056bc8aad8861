//! Command dispatch and output formatting for `todo-search`.

use std::path::Path;

use log::info;
use rusqlite::Connection;
use todo_search_core::db::{open_db, open_db_in_memory};
use todo_search_core::{
    init_logging, Dataset, LogLevel, SearchStrategy, SeedLoader, Sort, SqliteTodoRepository,
    Todo, TodoId, TodoService,
};

use crate::cli::{Cli, Commands};
use crate::error::CliError;

pub fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        start_logging(cli.log_level, log_dir)?;
    }

    let mut conn = match cli.db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    if let Some(dataset) = cli.dataset.as_deref() {
        seed_from(&mut conn, dataset)?;
    }

    match cli.command {
        Commands::Seed { file } => {
            let inserted = seed_from(&mut conn, &file)?;
            println!("seeded {inserted} todos from {}", file.display());
        }
        Commands::Add { title, description } => {
            let id = service(&conn).add_todo(&title, description.as_deref())?;
            println!("{id}");
        }
        Commands::List { order, json } => {
            let todos = service(&conn).list_todos(&order.to_sort())?;
            print_todos(&todos, json)?;
        }
        Commands::Show { id, json } => {
            let todo = service(&conn).get_todo(id)?.ok_or(CliError::NotFound(id))?;
            print_todos(std::slice::from_ref(&todo), json)?;
        }
        Commands::Delete { id } => {
            service(&conn).delete_todo(id)?;
            println!("deleted {id}");
        }
        Commands::Search {
            term,
            strategy,
            order,
            json,
        } => {
            let todos = search(&conn, strategy, &term, &order.to_sort())?;
            print_todos(&todos, json)?;
        }
    }

    Ok(())
}

fn start_logging(level: Option<LogLevel>, log_dir: &Path) -> Result<(), CliError> {
    let level = level.unwrap_or_else(LogLevel::build_default);
    init_logging(level, log_dir).map_err(CliError::Logging)
}

fn service(conn: &Connection) -> TodoService<SqliteTodoRepository<'_>> {
    TodoService::new(SqliteTodoRepository::new(conn))
}

fn seed_from(conn: &mut Connection, path: &Path) -> Result<usize, CliError> {
    let dataset = Dataset::from_path(path)?;
    let inserted = dataset.seed(conn)?;
    info!("event=cli_seed module=cli status=ok rows={inserted}");
    Ok(inserted)
}

fn search(
    conn: &Connection,
    strategy: SearchStrategy,
    term: &str,
    sort: &Sort,
) -> Result<Vec<Todo>, CliError> {
    let service = service(conn);
    let todos = match strategy {
        SearchStrategy::Derived => service.find_by_search_term(term, sort)?,
        SearchStrategy::SortedInQuery => service.find_by_search_term_sorted_in_query(term)?,
        SearchStrategy::Native => service.find_by_search_term_native(term)?,
    };
    Ok(todos)
}

fn print_todos(todos: &[Todo], as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(todos)?);
        return Ok(());
    }

    for line in format_todo_lines(todos) {
        println!("{line}");
    }
    Ok(())
}

fn format_todo_lines(todos: &[Todo]) -> Vec<String> {
    todos
        .iter()
        .map(|todo| format_todo_line(todo.id, &todo.title, todo.description.as_deref()))
        .collect()
}

fn format_todo_line(id: TodoId, title: &str, description: Option<&str>) -> String {
    match description {
        Some(description) if !description.is_empty() => format!("{id:>4}  {title}  ({description})"),
        _ => format!("{id:>4}  {title}"),
    }
}
