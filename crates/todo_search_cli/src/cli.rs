//! Command-line surface of `todo-search`.
//!
//! Strategy, sort field and log level arguments parse through the core
//! `FromStr` impls, so the CLI accepts exactly the names the library does.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use todo_search_core::{Direction, LogLevel, Order, SearchStrategy, Sort, TodoField};

#[derive(Parser)]
#[command(name = "todo-search")]
#[command(about = "Search and manage todo entries stored in SQLite")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database file; an in-memory database is used when omitted
    #[arg(long, global = true, value_name = "PATH", env = "TODO_SEARCH_DB")]
    pub db_path: Option<PathBuf>,

    /// JSON dataset to clean-insert before running the command
    #[arg(long, global = true, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true, value_name = "DIR", env = "TODO_SEARCH_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace every todo with the rows of a JSON dataset
    Seed {
        /// Dataset file
        file: PathBuf,
    },
    /// Create a todo
    #[command(alias = "new")]
    Add {
        /// Todo title
        title: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List todos
    List {
        #[command(flatten)]
        order: OrderArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one todo
    Show {
        /// Todo id
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a todo
    Delete {
        /// Todo id
        id: i64,
    },
    /// Find todos whose title or description contains a term
    Search {
        /// Case-insensitive search term
        term: String,
        /// How the search statement is built: derived, sorted-in-query or native
        #[arg(long, value_name = "STRATEGY", default_value = "derived")]
        strategy: SearchStrategy,
        #[command(flatten)]
        order: OrderArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
pub struct OrderArgs {
    /// Field to order by: id, title, description, created-at or modified-at
    /// (only honored by the derived strategy when searching)
    #[arg(long, value_name = "FIELD", default_value = "title")]
    pub sort: TodoField,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl OrderArgs {
    pub fn to_sort(&self) -> Sort {
        Sort::by(Order {
            field: self.sort,
            direction: if self.desc {
                Direction::Desc
            } else {
                Direction::Asc
            },
        })
    }
}
