//! The [`HsnRecord`] reference entry.
use serde::{Deserialize, Serialize};

use crate::code::HsnCode;

/// A single entry in the HSN reference dataset.
///
/// A defined struct rather than an open-ended map: the `code` is validated at
/// deserialization time via [`HsnCode`], and `description` is the
/// human-readable text shown for a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsnRecord {
    /// The well-formed HSN code this record describes.
    pub code: HsnCode,
    /// Human-readable description of the goods classification.
    pub description: String,
}

impl HsnRecord {
    /// Constructs a record from a validated code and description.
    pub fn new(code: HsnCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}
