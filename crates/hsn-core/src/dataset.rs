//! The in-memory reference table and the lookup capability it exposes.
//!
//! [`HsnLookup`] is the single capability the validator consumes: lookup of a
//! record by code string. It is an object-safe trait so the validator can be
//! tested against a mock table, independent of how the real data is loaded.
//! [`HsnTable`] is the concrete implementation: a `HashMap` keyed by code
//! string plus the insertion-ordered record list that the suggester indexes.
//!
//! Loading is an explicit, fallible step. An empty dataset is a load-time
//! error, never a table that silently answers `None` to every lookup.
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::HsnRecord;

/// Read-only lookup of an HSN record by its code string.
///
/// The validator receives this as an injected dependency and performs no I/O
/// of its own. Implementations must answer in near-constant time; the table
/// is read-only for the lifetime of the process.
pub trait HsnLookup {
    /// Returns the record for `code`, or `None` when the code is absent.
    fn get_hsn_info(&self, code: &str) -> Option<&HsnRecord>;
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced while building an [`HsnTable`].
#[derive(Debug)]
pub enum DatasetError {
    /// The dataset contains no records at all.
    ///
    /// Validating against a table that was never populated would make every
    /// code look like `NotFound`; loading fails instead.
    Empty,
    /// The JSON input could not be parsed into the dataset shape.
    Parse {
        /// Human-readable description of the parse failure.
        detail: String,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("dataset contains no records"),
            Self::Parse { detail } => write!(f, "dataset parse error: {detail}"),
        }
    }
}

impl std::error::Error for DatasetError {}

// ---------------------------------------------------------------------------
// Serialized dataset shape
// ---------------------------------------------------------------------------

/// The on-disk JSON shape of a reference dataset.
///
/// ```json
/// {"records":[{"code":"01","description":"LIVE ANIMALS"}]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HsnDataset {
    /// All reference records, in source order.
    pub records: Vec<HsnRecord>,
}

// ---------------------------------------------------------------------------
// HsnTable
// ---------------------------------------------------------------------------

/// Summary statistics for a loaded reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    /// Total number of distinct codes in the table.
    pub total_codes: usize,
    /// Record count grouped by code digit-count (2, 4, 6, 8).
    pub length_counts: BTreeMap<usize, usize>,
    /// The first few codes in source order, for a quick sanity glance.
    pub sample_codes: Vec<String>,
}

/// The loaded, read-only HSN reference table.
///
/// Keeps both a hash index (for O(1) [`HsnLookup`] answers) and the deduped
/// record list in source order (for description search and the suggester).
#[derive(Debug, Clone)]
pub struct HsnTable {
    index: HashMap<String, usize>,
    records: Vec<HsnRecord>,
}

impl HsnTable {
    /// Builds a table from a list of records.
    ///
    /// Duplicate codes keep the first occurrence; later duplicates are
    /// dropped. An empty input is [`DatasetError::Empty`].
    pub fn from_records(records: Vec<HsnRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        let mut index = HashMap::with_capacity(records.len());
        let mut deduped = Vec::with_capacity(records.len());
        for record in records {
            let key = record.code.as_str().to_owned();
            if index.contains_key(&key) {
                continue;
            }
            index.insert(key, deduped.len());
            deduped.push(record);
        }
        Ok(Self {
            index,
            records: deduped,
        })
    }

    /// Parses the JSON dataset format and builds a table from it.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::Parse`] — not valid JSON, or a record carries a
    ///   malformed code.
    /// - [`DatasetError::Empty`] — zero records.
    pub fn from_json_str(content: &str) -> Result<Self, DatasetError> {
        let dataset: HsnDataset =
            serde_json::from_str(content).map_err(|e| DatasetError::Parse {
                detail: format!("line {}, column {}: {e}", e.line(), e.column()),
            })?;
        Self::from_records(dataset.records)
    }

    /// Returns the number of distinct codes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table holds no records.
    ///
    /// Construction rejects empty inputs, so this is always `false` for a
    /// table obtained from [`HsnTable::from_records`].
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the deduped records in source order.
    pub fn records(&self) -> &[HsnRecord] {
        &self.records
    }

    /// Case-insensitive substring search over record descriptions.
    ///
    /// Returns at most `limit` records in source order.
    pub fn search_by_description(&self, query: &str, limit: usize) -> Vec<&HsnRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| r.description.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Computes summary statistics over the table.
    pub fn summary(&self) -> DatasetSummary {
        let mut length_counts: BTreeMap<usize, usize> = BTreeMap::new();
        for record in &self.records {
            *length_counts.entry(record.code.digits()).or_insert(0) += 1;
        }
        let sample_codes = self
            .records
            .iter()
            .take(5)
            .map(|r| r.code.as_str().to_owned())
            .collect();
        DatasetSummary {
            total_codes: self.records.len(),
            length_counts,
            sample_codes,
        }
    }
}

impl HsnLookup for HsnTable {
    fn get_hsn_info(&self, code: &str) -> Option<&HsnRecord> {
        self.index.get(code).map(|&i| &self.records[i])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
