//! CLI argument definitions using clap
//!
//! Commands:
//! - tabsearch query --schema <path> --data <path> [--config <path>] <words...>
//! - tabsearch explain --schema <path> [--config <path>] [--json] <words...>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabsearch - free-text search over a fixed-schema table
#[derive(Parser, Debug)]
#[command(name = "tabsearch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset (default: info)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search a dataset and print the result as JSON
    Query {
        /// Path to the schema file
        #[arg(long)]
        schema: PathBuf,

        /// Path to the dataset (.json row arrays, anything else is CSV)
        #[arg(long)]
        data: PathBuf,

        /// Path to a search configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Query words
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Show the plan for a query without scanning
    Explain {
        /// Path to the schema file
        #[arg(long)]
        schema: PathBuf,

        /// Path to a search configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the plan as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Query words
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
