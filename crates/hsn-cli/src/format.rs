/// Result formatting: human-readable and JSON (NDJSON) modes.
///
/// This module implements two output strategies for validation results and
/// suggestions:
///
/// - **Human mode** (default): one line per code or suggestion, the verdict
///   tag color-coded. Colors are disabled when `--no-color` is set, the
///   `NO_COLOR` environment variable is present (per <https://no-color.org>),
///   or the stream is not a TTY.
/// - **JSON mode**: each result is serialized as a single-line JSON object
///   (NDJSON).
///
/// Both modes support a **quiet** flag (suppress summaries) and a
/// **verbose** flag (add timing).
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use hsn_core::{BatchSummary, DatasetSummary, Suggestion, Validation, Verdict};

use crate::error::CliError;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted.
///
/// Colors are disabled when any of the following conditions hold:
/// - `no_color_flag` is `true` (the `--no-color` CLI flag was passed).
/// - The `NO_COLOR` environment variable is present (any value).
/// - stdout is not a TTY (e.g. the output is piped to a file).
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

// ---------------------------------------------------------------------------
// ANSI escape sequences
// ---------------------------------------------------------------------------

const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Output format selection, mirroring the CLI `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Human-readable, optionally colored output.
    Human,
    /// Structured NDJSON output.
    Json,
}

/// Configuration for the result formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
    /// Emit timing and metadata to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    ///
    /// `no_color_flag` is the `--no-color` boolean. Color detection also
    /// checks the `NO_COLOR` env var and the stdout TTY state.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation results
// ---------------------------------------------------------------------------

/// Writes one validation result to `writer` in the requested format.
///
/// Human mode: `VALID    0101  LIVE HORSES` or `INVALID  010  Invalid length 3`,
/// the tag green/red when colors are on. JSON mode: one NDJSON object per
/// result:
///
/// ```json
/// {"input":"0101","cleaned":"0101","valid":true,"description":"LIVE HORSES"}
/// {"input":"010","cleaned":"010","valid":false,"error":"Invalid length 3"}
/// ```
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_validation<W: Write>(
    writer: &mut W,
    result: &Validation,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => {
            let (tag, color, detail): (&str, &str, &str) = match &result.verdict {
                Verdict::Valid { description } => ("VALID  ", ANSI_GREEN, description),
                Verdict::Invalid(_) => ("INVALID", ANSI_RED, ""),
            };
            let detail = if detail.is_empty() {
                result.error_message().unwrap_or_default()
            } else {
                detail.to_owned()
            };
            if config.colors {
                writeln!(writer, "{color}{tag}{ANSI_RESET}  {}  {detail}", result.input)
            } else {
                writeln!(writer, "{tag}  {}  {detail}", result.input)
            }
        }
        FormatMode::Json => {
            let mut obj = serde_json::json!({
                "input": result.input,
                "cleaned": result.cleaned,
                "valid": result.is_valid(),
            });
            match &result.verdict {
                Verdict::Valid { description } => {
                    obj["description"] = serde_json::Value::from(description.as_str());
                }
                Verdict::Invalid(failure) => {
                    obj["error"] = serde_json::Value::from(failure.to_string());
                }
            }
            writeln!(writer, "{obj}")
        }
    }
}

/// Writes the batch summary line.
///
/// Human: `3 codes: 2 valid, 1 invalid`. JSON:
/// `{"summary":{"total":3,"valid":2,"invalid":1}}`. Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_batch_summary<W: Write>(
    writer: &mut W,
    summary: &BatchSummary,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    match mode {
        FormatMode::Human => writeln!(
            writer,
            "{} {}: {} valid, {} invalid",
            summary.total,
            pluralize(summary.total, "code", "codes"),
            summary.valid,
            summary.invalid,
        ),
        FormatMode::Json => writeln!(
            writer,
            r#"{{"summary":{{"total":{},"valid":{},"invalid":{}}}}}"#,
            summary.total, summary.valid, summary.invalid,
        ),
    }
}

// ---------------------------------------------------------------------------
// Suggestions and search results
// ---------------------------------------------------------------------------

/// Writes one suggestion to `writer` in the requested format.
///
/// Human: `0101  0.832  high  LIVE HORSES`. JSON: the serialized
/// [`Suggestion`] as one NDJSON line.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_suggestion<W: Write>(
    writer: &mut W,
    suggestion: &Suggestion,
    mode: FormatMode,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => writeln!(
            writer,
            "{}  {:.3}  {}  {}",
            suggestion.code, suggestion.score, suggestion.confidence, suggestion.description,
        ),
        FormatMode::Json => {
            let line = serde_json::to_string(suggestion).map_err(std::io::Error::other)?;
            writeln!(writer, "{line}")
        }
    }
}

/// Writes one description-search hit to `writer`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_search_hit<W: Write>(
    writer: &mut W,
    code: &str,
    description: &str,
    mode: FormatMode,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => writeln!(writer, "{code}  {description}"),
        FormatMode::Json => {
            let obj = serde_json::json!({"code": code, "description": description});
            writeln!(writer, "{obj}")
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset summary
// ---------------------------------------------------------------------------

/// Writes the `inspect` summary to `writer`.
///
/// Human mode prints aligned key/value lines; JSON mode emits the serialized
/// [`DatasetSummary`] as a single object.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_dataset_summary<W: Write>(
    writer: &mut W,
    summary: &DatasetSummary,
    mode: FormatMode,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => {
            writeln!(writer, "total codes:   {}", summary.total_codes)?;
            for (length, count) in &summary.length_counts {
                writeln!(writer, "{length}-digit codes: {count}")?;
            }
            writeln!(writer, "sample codes:  {}", summary.sample_codes.join(", "))
        }
        FormatMode::Json => {
            let line = serde_json::to_string(summary).map_err(std::io::Error::other)?;
            writeln!(writer, "{line}")
        }
    }
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Writes timing information to `writer` in verbose mode.
///
/// This is a no-op when `config.verbose` is `false`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

/// Wraps a stderr write failure into a [`CliError`].
pub fn stderr_error(e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: "stderr".to_owned(),
        detail: e.to_string(),
    }
}

/// Wraps a stdout write failure into a [`CliError`].
pub fn stdout_error(e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}

fn pluralize(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
