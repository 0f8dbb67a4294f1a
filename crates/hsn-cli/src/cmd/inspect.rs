//! Implementation of `hsn inspect`.
//!
//! Prints summary statistics for a loaded reference table: total code count,
//! counts by digit length, and the first few codes.
//!
//! Exit codes: 0 = success, 2 = dataset unreadable.
use std::io::Write as _;

use hsn_core::HsnTable;

use crate::error::CliError;
use crate::format::{FormatMode, stdout_error, write_dataset_summary};

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] only when writing output fails.
pub fn run(table: &HsnTable, mode: FormatMode) -> Result<(), CliError> {
    let summary = table.summary();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_dataset_summary(&mut out, &summary, mode).map_err(|e| stdout_error(&e))?;
    out.flush().map_err(|e| stdout_error(&e))
}
