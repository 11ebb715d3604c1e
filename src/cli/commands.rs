//! CLI command implementations
//!
//! Each command loads its inputs, runs through a `SearchEngine` and prints.
//! The `execute_*` functions do the work without printing so they can be
//! tested directly.

use std::path::Path;
use std::time::Instant;

use crate::config::SearchConfig;
use crate::dataset::{Dataset, DatasetLoader};
use crate::engine::SearchEngine;
use crate::executor::QueryResult;
use crate::observability::init_logging;
use crate::planner::ExplainPlan;
use crate::schema::{Schema, SchemaLoader};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{write_json, write_summary, write_text};

/// Parse arguments, install logging and run the command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(cli.log_level.as_deref())?;
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Query {
            schema,
            data,
            config,
            words,
        } => query(&schema, &data, config.as_deref(), &words),
        Command::Explain {
            schema,
            config,
            json,
            words,
        } => explain(&schema, config.as_deref(), json, &words),
    }
}

/// Search a dataset and print the result
pub fn query(schema: &Path, data: &Path, config: Option<&Path>, words: &[String]) -> CliResult<()> {
    let started = Instant::now();
    let result = execute_query(schema, data, config, words)?;
    write_json(&result)?;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let summary = if result.scan_skipped {
        format!(
            "0 results, scan skipped (uncovered: {}) in {:.3} ms",
            result.uncovered_tokens.join(" "),
            elapsed_ms
        )
    } else {
        format!(
            "{} results from {} rows in {:.3} ms",
            result.match_count, result.scanned_rows, elapsed_ms
        )
    };
    write_summary(&summary)
}

/// Print the plan for a query
pub fn explain(schema: &Path, config: Option<&Path>, json: bool, words: &[String]) -> CliResult<()> {
    let plan = execute_explain(schema, config, words)?;
    if json {
        write_json(&plan)
    } else {
        write_text(&plan.to_string())
    }
}

/// Loads everything a query needs and runs it
pub fn execute_query(
    schema: &Path,
    data: &Path,
    config: Option<&Path>,
    words: &[String],
) -> CliResult<QueryResult> {
    let schema = SchemaLoader::load(schema)?;
    let config = load_config(config)?;
    let dataset = load_dataset(&schema, data)?;

    let engine = SearchEngine::new(&schema, &dataset, config)?;
    Ok(engine.query(&words.join(" "))?)
}

/// Plans a query against a schema alone
pub fn execute_explain(schema: &Path, config: Option<&Path>, words: &[String]) -> CliResult<ExplainPlan> {
    let schema = SchemaLoader::load(schema)?;
    let config = load_config(config)?;
    let dataset = Dataset::default();

    let engine = SearchEngine::new(&schema, &dataset, config)?;
    Ok(engine.explain(&words.join(" "))?)
}

fn load_config(path: Option<&Path>) -> CliResult<SearchConfig> {
    match path {
        Some(path) => Ok(SearchConfig::load(path)?),
        None => Ok(SearchConfig::default()),
    }
}

/// Picks the loader by file extension: `.json` is row arrays, anything else CSV
fn load_dataset(schema: &Schema, path: &Path) -> CliResult<Dataset> {
    let loader = DatasetLoader::new(schema);
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    let dataset = if is_json {
        loader.load_json(path)?
    } else {
        loader.load_csv(path)?
    };
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::cli::CliError;
    use tempfile::TempDir;

    const SCHEMA: &str = r#"[
        {"name": "id", "type": "integer", "match": "exact"},
        {"name": "state", "type": "string", "match": "edge", "max_length": 2,
         "is_all_upper": true, "contains_multiple_words": false},
        {"name": "code", "type": "string", "match": "edge", "max_length": 6,
         "contains_multiple_words": false}
    ]"#;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn setup() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("schema.json"), SCHEMA).unwrap();
        fs::write(
            tmp.path().join("data.csv"),
            "id,state,code\n1,NE,HDBUY\n2,AZ,SDRENT\n",
        )
        .unwrap();
        fs::write(
            tmp.path().join("data.json"),
            r#"[[1, "NE", "HDBUY"], [2, "AZ", "SDRENT"]]"#,
        )
        .unwrap();
        tmp
    }

    #[test]
    fn test_execute_query_csv() {
        let tmp = setup();
        let result = execute_query(
            &tmp.path().join("schema.json"),
            &tmp.path().join("data.csv"),
            None,
            &words("HDBUY"),
        )
        .unwrap();
        assert_eq!(result.matched_rows, vec![0]);
    }

    #[test]
    fn test_execute_query_json() {
        let tmp = setup();
        let result = execute_query(
            &tmp.path().join("schema.json"),
            &tmp.path().join("data.json"),
            None,
            &words("az"),
        )
        .unwrap();
        assert_eq!(result.matched_rows, vec![1]);
    }

    #[test]
    fn test_execute_query_with_config() {
        let tmp = setup();
        let config = tmp.path().join("config.json");
        fs::write(&config, r#"{"preview_limit": 0}"#).unwrap();

        let result = execute_query(
            &tmp.path().join("schema.json"),
            &tmp.path().join("data.csv"),
            Some(&config),
            &words("hdbuy"),
        )
        .unwrap();
        assert_eq!(result.match_count, 1);
        assert!(result.preview.is_empty());
    }

    #[test]
    fn test_execute_explain() {
        let tmp = setup();
        let plan = execute_explain(&tmp.path().join("schema.json"), None, &words("ne hdbuy")).unwrap();
        assert_eq!(plan.tokens, vec!["ne", "hdbuy"]);
        assert!(plan.scan_required);
    }

    #[test]
    fn test_missing_schema_is_error() {
        let tmp = setup();
        let err = execute_explain(&tmp.path().join("none.json"), None, &words("x")).unwrap_err();
        assert!(matches!(err, CliError::Schema(_)));
        assert_eq!(err.code(), "TABSEARCH_CLI_SCHEMA_ERROR");
    }

    #[test]
    fn test_bad_dataset_is_error() {
        let tmp = setup();
        let data = tmp.path().join("bad.csv");
        fs::write(&data, "id,state\n1,NE\n").unwrap();
        let err = execute_query(&tmp.path().join("schema.json"), &data, None, &words("ne")).unwrap_err();
        assert!(matches!(err, CliError::Dataset(_)));
    }
}
