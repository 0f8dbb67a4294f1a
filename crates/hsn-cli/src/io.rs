/// File and stdin reading with size enforcement, plus dataset loading.
///
/// This module is the single entry point for all input I/O in the `hsn`
/// binary. `hsn-core` never touches the filesystem; all reading happens here.
///
/// Key behaviours:
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - UTF-8 validation via `std::str::from_utf8` with byte-offset reporting
///   for text inputs; workbooks are read as raw bytes.
/// - All I/O errors are converted to [`CliError`] variants with exit code 2.
use std::io::{Cursor, Read as _};
use std::path::Path;

use hsn_core::{DatasetError, HsnTable};

use crate::PathOrStdin;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads the entire contents of `source` into a `String`.
///
/// For disk files the file length is checked against `max_size` via
/// `std::fs::metadata` before any bytes are read. For stdin a capped reader
/// (`Read::take`) is used so that the allocation is bounded.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for:
/// - file not found
/// - permission denied
/// - file exceeds `max_size`
/// - stdin stream exceeds `max_size`
/// - any other I/O error
/// - invalid UTF-8 (includes byte offset of the first bad sequence)
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    let bytes = read_input_bytes(source, max_size)?;
    bytes_to_string(&bytes, &source.label())
}

/// Reads the entire contents of `source` as raw bytes (no UTF-8 check).
pub fn read_input_bytes(source: &PathOrStdin, max_size: u64) -> Result<Vec<u8>, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

/// Loads the reference table from `source`.
///
/// A path ending in `.xlsx` or `.xls` is imported as a master workbook via
/// `hsn-excel`; anything else (including stdin) is parsed as the JSON
/// dataset format.
///
/// # Errors
///
/// All read failures from [`read_input_bytes`], plus:
/// - [`CliError::ParseFailed`] — malformed JSON or unreadable workbook.
/// - [`CliError::EmptyDataset`] — the input parsed but holds zero records.
pub fn load_table(source: &PathOrStdin, max_size: u64) -> Result<HsnTable, CliError> {
    let result = if is_workbook(source) {
        let bytes = read_input_bytes(source, max_size)?;
        let records =
            hsn_excel::import_workbook(Cursor::new(bytes)).map_err(|e| CliError::ParseFailed {
                detail: e.to_string(),
            })?;
        HsnTable::from_records(records)
    } else {
        let content = read_input(source, max_size)?;
        HsnTable::from_json_str(&content)
    };

    result.map_err(|e| match e {
        DatasetError::Empty => CliError::EmptyDataset {
            source: source.label(),
        },
        DatasetError::Parse { detail } => CliError::ParseFailed { detail },
    })
}

/// Returns `true` if the source is a disk path with an Excel extension.
fn is_workbook(source: &PathOrStdin) -> bool {
    match source {
        PathOrStdin::Stdin => false,
        PathOrStdin::Path(path) => matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("xlsx" | "xls")
        ),
    }
}

// ---------------------------------------------------------------------------
// Disk file reading
// ---------------------------------------------------------------------------

/// Reads a disk file, enforcing the size limit.
fn read_file(path: &Path, max_size: u64) -> Result<Vec<u8>, CliError> {
    // Size check via metadata so nothing is allocated for oversized inputs.
    let file_size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            return Err(io_error_to_cli(&e, path));
        }
    };

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))
}

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CliError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied {
            path: path.to_path_buf(),
        },
        // All other I/O error kinds are wrapped in the generic IoError variant.
        std::io::ErrorKind::ConnectionRefused
        | std::io::ErrorKind::ConnectionReset
        | std::io::ErrorKind::ConnectionAborted
        | std::io::ErrorKind::NotConnected
        | std::io::ErrorKind::BrokenPipe
        | std::io::ErrorKind::AlreadyExists
        | std::io::ErrorKind::WouldBlock
        | std::io::ErrorKind::InvalidInput
        | std::io::ErrorKind::InvalidData
        | std::io::ErrorKind::TimedOut
        | std::io::ErrorKind::WriteZero
        | std::io::ErrorKind::Interrupted
        | std::io::ErrorKind::Unsupported
        | std::io::ErrorKind::UnexpectedEof
        | std::io::ErrorKind::OutOfMemory
        | _ => CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Stdin reading
// ---------------------------------------------------------------------------

/// Reads the entire stdin stream, capped at `max_size` bytes.
///
/// Uses `Read::take` so the buffer allocation is bounded. If the stream
/// produces exactly `max_size` bytes we perform one final byte read to
/// distinguish "exactly at the limit" from "over the limit".
fn read_stdin(max_size: u64) -> Result<Vec<u8>, CliError> {
    let stdin = std::io::stdin();
    let handle = stdin.lock();

    let mut limited = handle.take(max_size);
    let mut buf: Vec<u8> = Vec::new();

    limited
        .read_to_end(&mut buf)
        .map_err(|e| CliError::StdinReadError {
            detail: e.to_string(),
        })?;

    if buf.len() as u64 == max_size {
        let stdin2 = std::io::stdin();
        let mut handle2 = stdin2.lock();
        let mut probe = [0u8; 1];
        let extra = handle2
            .read(&mut probe)
            .map_err(|e| CliError::StdinReadError {
                detail: e.to_string(),
            })?;
        if extra > 0 {
            return Err(CliError::FileTooLarge {
                source: "-".to_owned(),
                limit: max_size,
                actual: None,
            });
        }
    }

    Ok(buf)
}

// ---------------------------------------------------------------------------
// UTF-8 conversion
// ---------------------------------------------------------------------------

/// Converts a byte buffer to a `String`, returning a [`CliError`] with the
/// byte offset of the first invalid sequence on failure.
fn bytes_to_string(bytes: &[u8], source_label: &str) -> Result<String, CliError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => Err(CliError::InvalidUtf8 {
            source: source_label.to_owned(),
            byte_offset: e.valid_up_to(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::io::Write as _;
    use std::path::PathBuf;

    use super::*;

    fn temp_file(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        f.write_all(content).expect("write temp file");
        f
    }

    #[test]
    fn read_input_reads_disk_file() {
        let f = temp_file(b"hello");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        assert_eq!(read_input(&source, 1024).expect("read"), "hello");
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let source = PathOrStdin::Path(PathBuf::from("/no/such/file.json"));
        let err = read_input(&source, 1024).expect_err("must fail");
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn oversized_file_is_rejected_before_read() {
        let f = temp_file(b"0123456789");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let err = read_input(&source, 5).expect_err("must fail");
        assert!(matches!(err, CliError::FileTooLarge { .. }));
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let f = temp_file(&[b'o', b'k', 0xFF, 0xFE]);
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let err = read_input(&source, 1024).expect_err("must fail");
        match err {
            CliError::InvalidUtf8 { byte_offset, .. } => assert_eq!(byte_offset, 2),
            other => unreachable!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_table_parses_json_dataset() {
        let f = temp_file(br#"{"records":[{"code":"01","description":"LIVE ANIMALS"}]}"#);
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let table = load_table(&source, 1024).expect("table");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn load_table_empty_dataset_is_fatal() {
        let f = temp_file(br#"{"records":[]}"#);
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let err = load_table(&source, 1024).expect_err("must fail");
        assert!(matches!(err, CliError::EmptyDataset { .. }));
    }

    #[test]
    fn load_table_malformed_json_is_parse_failed() {
        let f = temp_file(b"{not json");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let err = load_table(&source, 1024).expect_err("must fail");
        assert!(matches!(err, CliError::ParseFailed { .. }));
    }

    #[test]
    fn xlsx_extension_routes_to_workbook_import() {
        let source: PathOrStdin = "master.xlsx".parse().expect("infallible");
        assert!(is_workbook(&source));
        let source: PathOrStdin = "hsn.json".parse().expect("infallible");
        assert!(!is_workbook(&source));
        let source: PathOrStdin = "-".parse().expect("infallible");
        assert!(!is_workbook(&source));
    }

    #[test]
    fn garbage_xlsx_is_parse_failed() {
        let f = temp_file(b"definitely not a zip archive");
        let mut path = f.path().to_path_buf();
        path.set_extension("xlsx");
        std::fs::copy(f.path(), &path).expect("copy to xlsx path");
        let source = PathOrStdin::Path(path.clone());
        let err = load_table(&source, 1024).expect_err("must fail");
        assert!(matches!(err, CliError::ParseFailed { .. }));
        let _ = std::fs::remove_file(path);
    }
}
