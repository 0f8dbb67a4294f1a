//! Implementation of `hsn import`.
//!
//! Reads an `.xlsx` master workbook and writes the JSON dataset format to
//! stdout or a specified output path.
//!
//! Exit codes:
//! - 0 = success
//! - 2 = file not found, unreadable workbook, or no usable rows
use std::fs;
use std::io::{self, Cursor, Write as _};
use std::path::Path;

use hsn_core::HsnDataset;

use crate::PathOrStdin;
use crate::error::CliError;
use crate::io::read_input_bytes;

/// Runs the `import` command.
///
/// Reads the workbook at `file`, converts it to the JSON dataset format, and
/// writes the result to `output` (or stdout when `output` is `None`).
///
/// # Errors
///
/// Returns [`CliError`] on I/O failures or import errors.
pub fn run(file: &Path, output: Option<&Path>, max_size: u64) -> Result<(), CliError> {
    let source = PathOrStdin::Path(file.to_path_buf());
    let bytes = read_input_bytes(&source, max_size)?;

    let records =
        hsn_excel::import_workbook(Cursor::new(bytes)).map_err(|e| CliError::ParseFailed {
            detail: e.to_string(),
        })?;

    let dataset = HsnDataset { records };
    let json = serde_json::to_string_pretty(&dataset).map_err(|e| CliError::IoError {
        source: "import".to_owned(),
        detail: format!("JSON serialization failed: {e}"),
    })?;

    match output {
        Some(out_path) => {
            fs::write(out_path, json.as_bytes()).map_err(|e| CliError::IoError {
                source: out_path.display().to_string(),
                detail: e.to_string(),
            })?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(json.as_bytes())
                .and_then(|()| handle.write_all(b"\n"))
                .map_err(|e| CliError::IoError {
                    source: "stdout".to_owned(),
                    detail: e.to_string(),
                })?;
        }
    }

    Ok(())
}
