//! Code normalization and the validated [`HsnCode`] newtype.
//!
//! An HSN code is a digit string of length 2, 4, 6, or 8. Raw inputs may
//! carry spaces, punctuation, or other noise; [`clean_code`] strips everything
//! that is not a decimal digit before any further check runs. [`HsnCode`]
//! wraps a string that has already passed the shape check, so dataset keys
//! and records cannot hold malformed codes.
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// The only permitted digit counts for a well-formed HSN code.
pub const VALID_LENGTHS: [usize; 4] = [2, 4, 6, 8];

/// Lengths at which a code has ancestor codes in the 2-4-6-8 hierarchy.
pub const PARENT_LENGTHS: [usize; 3] = [2, 4, 6];

// ---------------------------------------------------------------------------
// Regex statics
//
// Both patterns are compile-time string literals; Regex::new never returns
// Err for them. The fallback chain exists only because the workspace bans
// expect() and unwrap().
// ---------------------------------------------------------------------------

/// Matches any non-digit character.
static NON_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\D")
        .unwrap_or_else(|_| Regex::new(".").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

/// Matches a digit string of length 2, 4, 6, or 8.
static HSN_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{2}|\d{4}|\d{6}|\d{8})$")
        .unwrap_or_else(|_| Regex::new(".").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

/// Removes every character that is not a decimal digit from `raw`.
///
/// The result may be empty (input contained no digits at all) or of any
/// length; callers decide what to do with the residue.
///
/// # Examples
///
/// ```
/// use hsn_core::code::clean_code;
///
/// assert_eq!(clean_code(" 01.01 "), "0101");
/// assert_eq!(clean_code("ABCD"), "");
/// ```
pub fn clean_code(raw: &str) -> String {
    NON_DIGIT_RE.replace_all(raw, "").into_owned()
}

/// Returns the strict-prefix ancestor codes of `cleaned` at the permitted
/// parent lengths.
///
/// For a length-8 code this is the 2-, 4-, and 6-digit prefixes; for length 6
/// the 2- and 4-digit prefixes; for length 4 the 2-digit prefix; for length 2
/// the empty slice. The caller guarantees `cleaned` is ASCII digits.
pub fn parent_prefixes(cleaned: &str) -> Vec<&str> {
    PARENT_LENGTHS
        .iter()
        .filter(|&&len| cleaned.len() > len)
        .filter_map(|&len| cleaned.get(..len))
        .collect()
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Error produced when constructing an [`HsnCode`] from an invalid string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// The string is not a digit sequence of length 2, 4, 6, or 8.
    InvalidFormat {
        /// The input that was rejected.
        got: String,
    },
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { got } => {
                write!(f, "invalid HSN code: expected 2/4/6/8 digits, got {got:?}")
            }
        }
    }
}

impl std::error::Error for CodeError {}

// ---------------------------------------------------------------------------
// HsnCode
// ---------------------------------------------------------------------------

/// A digit string of length 2, 4, 6, or 8 — a well-formed HSN code.
///
/// Construction via [`TryFrom<&str>`] enforces the shape constraint; once
/// constructed the inner value is immutable. The serde `Deserialize` impl
/// re-runs validation so malformed codes cannot enter through untrusted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HsnCode(String);

impl HsnCode {
    /// Returns the inner digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the digit count (2, 4, 6, or 8).
    pub fn digits(&self) -> usize {
        self.0.len()
    }
}

impl TryFrom<&str> for HsnCode {
    type Error = CodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if HSN_CODE_RE.is_match(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(CodeError::InvalidFormat {
                got: value.to_owned(),
            })
        }
    }
}

impl TryFrom<String> for HsnCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if HSN_CODE_RE.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(CodeError::InvalidFormat { got: value })
        }
    }
}

impl Deref for HsnCode {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for HsnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for HsnCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HsnCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
