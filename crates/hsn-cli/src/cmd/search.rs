//! Implementation of `hsn search`.
//!
//! Case-insensitive substring search over record descriptions. An empty
//! result set is not an error.
use std::io::Write as _;

use hsn_core::HsnTable;

use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, stderr_error, stdout_error, write_search_hit};

/// Runs the `search` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] only when writing output fails.
pub fn run(
    table: &HsnTable,
    query: &str,
    limit: usize,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let hits = table.search_by_description(query, limit);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in &hits {
        write_search_hit(&mut out, record.code.as_str(), &record.description, mode)
            .map_err(|e| stdout_error(&e))?;
    }
    out.flush().map_err(|e| stdout_error(&e))?;

    if hits.is_empty() && !config.quiet && matches!(mode, FormatMode::Human) {
        let stderr = std::io::stderr();
        let mut err_out = stderr.lock();
        writeln!(err_out, "no matches for {query:?}").map_err(|e| stderr_error(&e))?;
    }

    Ok(())
}
