//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`]. This avoids stringly-typed handling of the stdin
/// sentinel throughout the codebase.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// A human-readable label for error messages: `"-"` for stdin, else the path.
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "-".to_owned(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits plain, optionally colored lines. `Json` emits structured
/// JSON (NDJSON for per-code results and suggestions, a single object for
/// `inspect`).
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON / NDJSON output.
    Json,
}

/// All top-level subcommands exposed by the `hsn` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Validate one or more HSN codes against a reference dataset.
    Validate {
        /// Reference dataset: a JSON dataset file, an .xlsx master workbook,
        /// or `-` for a JSON dataset on stdin.
        #[arg(long, value_name = "FILE")]
        data: PathOrStdin,
        /// Codes to validate.
        #[arg(value_name = "CODE")]
        codes: Vec<String>,
        /// Read additional codes, one per line, from a file or `-` for stdin.
        #[arg(long, value_name = "FILE")]
        batch: Option<PathOrStdin>,
    },

    /// Suggest HSN codes for a product description.
    Suggest {
        /// Reference dataset: a JSON dataset file, an .xlsx master workbook,
        /// or `-` for a JSON dataset on stdin.
        #[arg(long, value_name = "FILE")]
        data: PathOrStdin,
        /// Free-text product description to match against.
        #[arg(value_name = "QUERY")]
        query: String,
        /// Maximum number of suggestions to return.
        #[arg(long, default_value = "5")]
        top_k: usize,
    },

    /// Search record descriptions by case-insensitive substring.
    Search {
        /// Reference dataset: a JSON dataset file, an .xlsx master workbook,
        /// or `-` for a JSON dataset on stdin.
        #[arg(long, value_name = "FILE")]
        data: PathOrStdin,
        /// Substring to search for.
        #[arg(value_name = "QUERY")]
        query: String,
        /// Maximum number of matches to return.
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Print summary statistics for a reference dataset.
    Inspect {
        /// Reference dataset: a JSON dataset file, an .xlsx master workbook,
        /// or `-` for a JSON dataset on stdin.
        #[arg(long, value_name = "FILE")]
        data: PathOrStdin,
    },

    /// Convert an .xlsx master workbook to the JSON dataset format.
    Import {
        /// Path to the master workbook.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write the JSON dataset here instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Root CLI struct for the `hsn` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "hsn",
    version,
    about = "HSN code lookup and validation tool",
    long_about = "Validates Harmonized System Nomenclature codes against a reference\n\
                  dataset: digit-count check, existence check, and parent-hierarchy\n\
                  check. Also suggests codes for free-text product descriptions and\n\
                  imports master workbooks."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase stderr verbosity: timing and dataset metadata
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `HSN_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(
        long,
        global = true,
        env = "HSN_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use clap::Parser;

    use super::*;

    #[test]
    fn dash_parses_as_stdin() {
        let parsed: PathOrStdin = "-".parse().expect("infallible");
        assert!(matches!(parsed, PathOrStdin::Stdin));
    }

    #[test]
    fn path_parses_as_path() {
        let parsed: PathOrStdin = "data/hsn.json".parse().expect("infallible");
        match parsed {
            PathOrStdin::Path(p) => assert_eq!(p, PathBuf::from("data/hsn.json")),
            PathOrStdin::Stdin => unreachable!("plain path must not be stdin"),
        }
    }

    #[test]
    fn validate_accepts_multiple_codes() {
        let cli = Cli::try_parse_from(["hsn", "validate", "--data", "hsn.json", "01", "0101"])
            .expect("parse");
        match cli.command {
            Command::Validate { codes, .. } => assert_eq!(codes, vec!["01", "0101"]),
            Command::Suggest { .. }
            | Command::Search { .. }
            | Command::Inspect { .. }
            | Command::Import { .. } => unreachable!("wrong subcommand"),
        }
    }

    #[test]
    fn suggest_default_top_k_is_5() {
        let cli = Cli::try_parse_from(["hsn", "suggest", "--data", "hsn.json", "rice"])
            .expect("parse");
        match cli.command {
            Command::Suggest { top_k, .. } => assert_eq!(top_k, 5),
            Command::Validate { .. }
            | Command::Search { .. }
            | Command::Inspect { .. }
            | Command::Import { .. } => unreachable!("wrong subcommand"),
        }
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result =
            Cli::try_parse_from(["hsn", "-q", "-v", "inspect", "--data", "hsn.json"]);
        assert!(result.is_err());
    }
}
