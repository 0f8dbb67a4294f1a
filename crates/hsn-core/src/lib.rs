#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod code;
pub mod dataset;
pub mod record;
pub mod suggest;
pub mod validate;

pub use code::{CodeError, HsnCode, PARENT_LENGTHS, VALID_LENGTHS, clean_code, parent_prefixes};
pub use dataset::{DatasetError, DatasetSummary, HsnDataset, HsnLookup, HsnTable};
pub use record::HsnRecord;
pub use suggest::{Confidence, MatchKind, Suggester, Suggestion};
pub use validate::{
    BatchSummary, FailureKind, Validation, ValidationFailure, Verdict, validate, validate_many,
};

/// Returns the current version of the hsn-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
