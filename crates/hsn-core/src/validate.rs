//! The HSN code validator.
//!
//! [`validate`] is a pure function over a raw input string and an injected
//! [`HsnLookup`]: normalize, check the digit count against the permitted
//! lengths, confirm the code exists in the reference table, and confirm every
//! shorter-prefix ancestor exists as well. Every outcome — including every
//! rejection — is returned as data; the function is total over all string
//! inputs and never panics.
use std::fmt;

use serde::Serialize;

use crate::code::{VALID_LENGTHS, clean_code, parent_prefixes};
use crate::dataset::HsnLookup;

// ---------------------------------------------------------------------------
// Failure taxonomy
// ---------------------------------------------------------------------------

/// The reason a code was rejected.
///
/// All variants are rejections of the input, not faults of the validator.
/// Checks run in declaration order and short-circuit at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// The input contained no digit characters at all.
    NonNumeric,
    /// The cleaned digit count is not 2, 4, 6, or 8.
    InvalidLength {
        /// The observed digit count.
        got: usize,
    },
    /// The cleaned code is absent from the reference table.
    NotFound,
    /// One or more required prefix ancestors are absent from the table.
    MissingParents {
        /// The absent ancestor codes, in ascending length order.
        codes: Vec<String>,
    },
}

/// A single validation rejection, carrying its user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    /// The rejection category.
    #[serde(flatten)]
    pub kind: FailureKind,
}

impl ValidationFailure {
    fn new(kind: FailureKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FailureKind::NonNumeric => f.write_str("Non-numeric characters detected"),
            FailureKind::InvalidLength { got } => write!(f, "Invalid length {got}"),
            FailureKind::NotFound => f.write_str("Code not found in database"),
            FailureKind::MissingParents { codes } => {
                write!(f, "Missing parent codes: {}", codes.join(", "))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Result record
// ---------------------------------------------------------------------------

/// The outcome of one validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The code is well-formed, present, and hierarchically consistent.
    Valid {
        /// The description from the reference record for the cleaned code.
        description: String,
    },
    /// The code was rejected; see the failure for the reason.
    Invalid(ValidationFailure),
}

/// The full result record for one validation call.
///
/// Each validation is independent and stateless: calling [`validate`] twice
/// with the same input against an unchanged table yields identical results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// The raw input as supplied by the caller.
    pub input: String,
    /// The digit-only normalization of the input (possibly empty).
    pub cleaned: String,
    /// Valid with a description, or invalid with a failure.
    pub verdict: Verdict,
}

impl Validation {
    /// Returns `true` when the verdict is [`Verdict::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self.verdict, Verdict::Valid { .. })
    }

    /// Returns the user-visible rejection message, or `None` when valid.
    pub fn error_message(&self) -> Option<String> {
        match &self.verdict {
            Verdict::Valid { .. } => None,
            Verdict::Invalid(failure) => Some(failure.to_string()),
        }
    }

    /// Returns the description for a valid code, or `None` when invalid.
    pub fn description(&self) -> Option<&str> {
        match &self.verdict {
            Verdict::Valid { description } => Some(description),
            Verdict::Invalid(_) => None,
        }
    }
}

/// Aggregate counts over a batch of validations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Number of codes validated.
    pub total: usize,
    /// Number of valid codes.
    pub valid: usize,
    /// Number of rejected codes.
    pub invalid: usize,
}

impl BatchSummary {
    /// Tallies a slice of validation results.
    pub fn from_results(results: &[Validation]) -> Self {
        let valid = results.iter().filter(|r| r.is_valid()).count();
        Self {
            total: results.len(),
            valid,
            invalid: results.len() - valid,
        }
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

/// Validates a raw HSN code against the reference table.
///
/// The checks run in order and short-circuit at the first failure:
///
/// 1. Strip every non-digit character.
/// 2. An empty residue (no digits at all) is [`FailureKind::NonNumeric`].
///    An input with digits plus extraneous characters passes this check.
/// 3. A digit count outside `{2, 4, 6, 8}` is [`FailureKind::InvalidLength`].
/// 4. A code absent from the table is [`FailureKind::NotFound`].
/// 5. Absent strict-prefix ancestors at lengths `{2, 4, 6}` are collected
///    into [`FailureKind::MissingParents`]; a length-2 code has no required
///    parents.
/// 6. Otherwise the code is valid and the verdict carries the record's
///    description.
pub fn validate(raw_code: &str, table: &dyn HsnLookup) -> Validation {
    let cleaned = clean_code(raw_code);

    if cleaned.is_empty() {
        return invalid(raw_code, cleaned, FailureKind::NonNumeric);
    }

    if !VALID_LENGTHS.contains(&cleaned.len()) {
        let got = cleaned.len();
        return invalid(raw_code, cleaned, FailureKind::InvalidLength { got });
    }

    let Some(record) = table.get_hsn_info(&cleaned) else {
        return invalid(raw_code, cleaned, FailureKind::NotFound);
    };

    let missing: Vec<String> = parent_prefixes(&cleaned)
        .into_iter()
        .filter(|p| table.get_hsn_info(p).is_none())
        .map(str::to_owned)
        .collect();
    if !missing.is_empty() {
        return invalid(raw_code, cleaned, FailureKind::MissingParents { codes: missing });
    }

    Validation {
        input: raw_code.to_owned(),
        cleaned,
        verdict: Verdict::Valid {
            description: record.description.clone(),
        },
    }
}

/// Validates a batch of codes, one independent [`validate`] call per code.
pub fn validate_many<S: AsRef<str>>(codes: &[S], table: &dyn HsnLookup) -> Vec<Validation> {
    codes
        .iter()
        .map(|code| validate(code.as_ref(), table))
        .collect()
}

fn invalid(input: &str, cleaned: String, kind: FailureKind) -> Validation {
    Validation {
        input: input.to_owned(),
        cleaned,
        verdict: Verdict::Invalid(ValidationFailure::new(kind)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
