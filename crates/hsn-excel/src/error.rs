//! Errors produced during workbook import.
use std::fmt;

/// All error conditions that can occur while importing an HSN master workbook.
#[derive(Debug)]
pub enum ImportError {
    /// No sheet in the workbook carries both a code and a description column.
    MissingHeaders {
        /// The sheet names that were examined, in workbook order.
        sheets: Vec<String>,
    },

    /// A cell value could not be turned into a well-formed HSN code.
    InvalidCell {
        /// Cell reference in `{Sheet}!{Column}{Row}` format.
        cell_ref: String,
        /// The raw value that was rejected.
        got: String,
    },

    /// The matched sheet contained no usable data rows.
    NoRecords {
        /// Name of the sheet that was scanned.
        sheet: String,
    },

    /// An I/O or parsing error from the calamine library.
    ExcelRead {
        /// Human-readable description of the error.
        detail: String,
    },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeaders { sheets } => {
                write!(
                    f,
                    "no sheet with HSN code and description columns; examined: {}",
                    sheets.join(", ")
                )
            }
            Self::InvalidCell { cell_ref, got } => {
                write!(f, "{cell_ref}: expected 2/4/6/8-digit HSN code, got {got:?}")
            }
            Self::NoRecords { sheet } => {
                write!(f, "sheet {sheet:?} contains no data rows")
            }
            Self::ExcelRead { detail } => {
                write!(f, "Excel read error: {detail}")
            }
        }
    }
}

impl std::error::Error for ImportError {}
