//! Output handling for the CLI
//!
//! - Results go to stdout as a single JSON document (or explain text)
//! - Summary lines and logs go to stderr so stdout stays machine-readable

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a value to stdout as pretty JSON
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Write plain text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", text)?;
    stdout.flush()?;
    Ok(())
}

/// Write a one-line summary to stderr
pub fn write_summary(line: &str) -> CliResult<()> {
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{}", line)?;
    Ok(())
}
