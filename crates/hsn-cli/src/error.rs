/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `hsn` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2** — input failure: the tool could not read or parse the
///   dataset or batch input at all. These errors terminate early before any
///   domain logic runs.
/// - Exit code **1** — logical failure: the tool ran to completion but the
///   result is a well-defined failure (one or more codes rejected).
use std::fmt;
use std::path::PathBuf;

/// All error conditions that the `hsn` CLI can produce.
///
/// Use [`CliError::exit_code`] to obtain the exit code associated with each
/// variant. [`CliError::message`] returns the human-readable error string
/// that should be printed to stderr before exiting.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// A human-readable label for the source (`"-"` for stdin, or the
        /// filesystem path).
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (disk files only; `None` for
        /// stdin where the exact size is unknown).
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// A human-readable label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The dataset or workbook could not be parsed.
    ParseFailed {
        /// Human-readable description of the parse failure.
        detail: String,
    },

    /// The dataset loaded but contains no records.
    ///
    /// Validating against an unpopulated table would make every code look
    /// absent, so this is fatal at load time.
    EmptyDataset {
        /// A human-readable label for the source.
        source: String,
    },

    /// An argument combination is invalid (e.g. no codes to validate).
    InvalidArgument {
        /// A description of the problem.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// A validation pass rejected one or more codes.
    ///
    /// The per-code results have already been printed; this variant exists so
    /// `main` can call `process::exit(1)` cleanly.
    ValidationErrors,
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2` — input failure (file not found, parse error, etc.).
    /// - `1` — logical failure (one or more codes rejected).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ParseFailed { .. }
            | Self::EmptyDataset { .. }
            | Self::InvalidArgument { .. } => 2,

            Self::ValidationErrors => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::ParseFailed { detail } => {
                format!("error: failed to parse dataset: {detail}")
            }
            Self::EmptyDataset { source } => {
                format!("error: dataset {source} contains no records")
            }
            Self::InvalidArgument { detail } => {
                format!("error: {detail}")
            }
            Self::ValidationErrors => {
                "error: validation failed for one or more codes".to_owned()
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
