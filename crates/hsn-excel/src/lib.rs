//! Excel import for the HSN toolkit.
//!
//! Reads an HSN master workbook (such as the GST `HSN_SAC.xlsx` master) and
//! produces the record list that [`hsn_core::HsnTable`] is built from. The
//! `calamine` dependency is confined to this crate and does not bleed into
//! `hsn-core` or `hsn-cli`.
//!
//! # Sheet discovery
//!
//! Master workbooks are inconsistent about sheet names, so sheets are scanned
//! in workbook order and the first one whose header row carries both a code
//! column (`HSNCode`, `HSN Code`, or `Code`) and a `Description` column wins.
//! Header matching is case-insensitive.
//!
//! # Leading zeros
//!
//! Excel stores numeric cells as floats, which drops the leading zero from
//! codes like `0101`. A digit string of odd length is therefore left-padded
//! with one `0` before validation.
use std::io::{Read, Seek};

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};

use hsn_core::{HsnCode, HsnRecord};

mod error;
mod sheet;

pub use error::ImportError;

use sheet::{build_header_index, cell_ref, cell_to_string};

/// Accepted header names for the code column, lowercased.
const CODE_HEADERS: &[&str] = &["hsncode", "hsn code", "code"];

/// Accepted header names for the description column, lowercased.
const DESCRIPTION_HEADERS: &[&str] = &["description"];

/// Imports an HSN master workbook and returns its records in sheet order.
///
/// The reader must be positioned at the start of a valid `.xlsx` file.
/// Rows with a blank code or blank description are skipped (the master data
/// carries section-header rows with only one field filled). Duplicate codes
/// keep the first occurrence.
///
/// # Errors
///
/// - [`ImportError::ExcelRead`] — the input is not a readable workbook.
/// - [`ImportError::MissingHeaders`] — no sheet carries both required columns.
/// - [`ImportError::InvalidCell`] — a code cell is not a 2/4/6/8-digit code
///   even after zero-padding.
/// - [`ImportError::NoRecords`] — the matched sheet has no usable data rows.
pub fn import_workbook<R: Read + Seek>(reader: R) -> Result<Vec<HsnRecord>, ImportError> {
    let mut workbook: Xlsx<R> =
        open_workbook_from_rs(reader).map_err(|e: calamine::XlsxError| ImportError::ExcelRead {
            detail: e.to_string(),
        })?;

    let sheet_names: Vec<String> = workbook.sheet_names().clone();

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| ImportError::ExcelRead {
                detail: format!("failed to read sheet {name:?}: {e}"),
            })?;
        if let Some((code_col, desc_col)) = find_columns(&range) {
            return parse_records(&range, name, code_col, desc_col);
        }
    }

    Err(ImportError::MissingHeaders {
        sheets: sheet_names,
    })
}

/// Returns the (code, description) column indices if the sheet's header row
/// carries both, else `None`.
fn find_columns(range: &Range<Data>) -> Option<(usize, usize)> {
    let headers = build_header_index(range);
    let code_col = CODE_HEADERS
        .iter()
        .find_map(|h| headers.get(*h).copied())?;
    let desc_col = DESCRIPTION_HEADERS
        .iter()
        .find_map(|h| headers.get(*h).copied())?;
    Some((code_col, desc_col))
}

/// Reads data rows into records, skipping blanks and deduplicating by code.
fn parse_records(
    range: &Range<Data>,
    sheet_name: &str,
    code_col: usize,
    desc_col: usize,
) -> Result<Vec<HsnRecord>, ImportError> {
    let mut records: Vec<HsnRecord> = Vec::new();
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();

    for (data_row_idx, row) in range.rows().skip(1).enumerate() {
        let raw_code = cell_to_string(row.get(code_col).unwrap_or(&Data::Empty));
        let description = cell_to_string(row.get(desc_col).unwrap_or(&Data::Empty));
        if raw_code.is_empty() || description.is_empty() {
            continue;
        }

        let padded = pad_leading_zero(&raw_code);
        let code = HsnCode::try_from(padded.as_str()).map_err(|_| ImportError::InvalidCell {
            cell_ref: cell_ref(sheet_name, code_col, data_row_idx),
            got: raw_code.clone(),
        })?;

        if seen.insert(padded) {
            records.push(HsnRecord::new(code, description));
        }
    }

    if records.is_empty() {
        return Err(ImportError::NoRecords {
            sheet: sheet_name.to_owned(),
        });
    }
    Ok(records)
}

/// Restores a leading zero lost to Excel's numeric cell representation.
///
/// Only all-digit strings of odd length are padded; anything else is
/// returned unchanged and left to code validation.
fn pad_leading_zero(raw: &str) -> String {
    if raw.len() % 2 == 1 && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("0{raw}")
    } else {
        raw.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_length_digits_get_padded() {
        assert_eq!(pad_leading_zero("101"), "0101");
        assert_eq!(pad_leading_zero("1010011"), "01010011");
    }

    #[test]
    fn even_length_digits_unchanged() {
        assert_eq!(pad_leading_zero("0101"), "0101");
        assert_eq!(pad_leading_zero("99"), "99");
    }

    #[test]
    fn non_digit_strings_unchanged() {
        assert_eq!(pad_leading_zero("1x3"), "1x3");
    }
}
