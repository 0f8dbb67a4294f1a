//! Implementation of `hsn validate`.
//!
//! Validates each code independently against the loaded reference table,
//! emitting one result line per code to stdout and a batch summary to stderr.
//!
//! Exit codes:
//! - 0 = every code valid
//! - 1 = at least one code rejected
//! - 2 = input failure (dataset unreadable, no codes given)
use std::io::Write as _;
use std::time::Instant;

use hsn_core::{BatchSummary, HsnTable, validate_many};

use crate::error::CliError;
use crate::format::{
    FormatMode, FormatterConfig, stderr_error, stdout_error, write_batch_summary,
    write_timing, write_validation,
};

/// Runs the `validate` command.
///
/// `codes` holds the positional code arguments; `batch_content`, when
/// present, is the already-read batch input and contributes one code per
/// non-blank line after the positional codes.
///
/// # Errors
///
/// - [`CliError::InvalidArgument`] — no codes from either source.
/// - [`CliError::ValidationErrors`] — one or more codes rejected.
pub fn run(
    table: &HsnTable,
    codes: &[String],
    batch_content: Option<&str>,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let mut all_codes: Vec<String> = codes.to_vec();
    if let Some(content) = batch_content {
        all_codes.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned),
        );
    }
    if all_codes.is_empty() {
        return Err(CliError::InvalidArgument {
            detail: "no codes to validate; pass codes as arguments or via --batch".to_owned(),
        });
    }

    let started = Instant::now();
    let results = validate_many(&all_codes, table);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for result in &results {
        write_validation(&mut out, result, mode, config).map_err(|e| stdout_error(&e))?;
    }
    out.flush().map_err(|e| stdout_error(&e))?;

    let summary = BatchSummary::from_results(&results);
    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();
    write_batch_summary(&mut err_out, &summary, mode, config).map_err(|e| stderr_error(&e))?;
    write_timing(&mut err_out, "validated", started.elapsed(), config)
        .map_err(|e| stderr_error(&e))?;

    if summary.invalid > 0 {
        Err(CliError::ValidationErrors)
    } else {
        Ok(())
    }
}
