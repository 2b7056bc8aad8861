//! Command-line front end for the todo search core.
//!
//! # Responsibility
//! - Parse flags, open the database and dispatch one command.
//! - Keep all data access behind `todo_search_core`.

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = commands::run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
