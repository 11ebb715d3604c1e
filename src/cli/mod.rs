//! CLI module for tabsearch
//!
//! Provides command-line interface for:
//! - query: Search a dataset and print the result
//! - explain: Print the plan for a query without scanning

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{execute_explain, execute_query, explain, query, run, run_command};
pub use errors::{CliError, CliResult};
pub use io::{write_json, write_summary, write_text};
