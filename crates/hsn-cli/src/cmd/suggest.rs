//! Implementation of `hsn suggest`.
//!
//! Builds the TF-IDF index over the loaded table and prints ranked
//! suggestions for a free-text product description. Finding no suggestions
//! is not an error; the command still exits 0.
use std::io::Write as _;
use std::time::Instant;

use hsn_core::{HsnTable, Suggester};

use crate::error::CliError;
use crate::format::{
    FormatMode, FormatterConfig, stderr_error, stdout_error, write_suggestion, write_timing,
};

/// Runs the `suggest` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] only when writing output fails.
pub fn run(
    table: &HsnTable,
    query: &str,
    top_k: usize,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let started = Instant::now();
    let suggester = Suggester::new(table);
    let suggestions = suggester.suggest(query, top_k);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for suggestion in &suggestions {
        write_suggestion(&mut out, suggestion, mode).map_err(|e| stdout_error(&e))?;
    }
    out.flush().map_err(|e| stdout_error(&e))?;

    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();
    if suggestions.is_empty() && !config.quiet && matches!(mode, FormatMode::Human) {
        writeln!(err_out, "no suggestions for {query:?}").map_err(|e| stderr_error(&e))?;
    }
    write_timing(&mut err_out, "suggested", started.elapsed(), config)
        .map_err(|e| stderr_error(&e))?;

    Ok(())
}
