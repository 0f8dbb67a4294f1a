//! Helpers for reading calamine worksheet rows.
use std::collections::HashMap;

use calamine::{Data, Range};

/// Builds a column-name -> column-index map from the header row (row 0).
///
/// Header names are trimmed and lowercased. Duplicate headers are
/// last-one-wins.
pub fn build_header_index(sheet: &Range<Data>) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    let Some(row) = sheet.rows().next() else {
        return map;
    };
    for (col_idx, cell) in row.iter().enumerate() {
        let header = cell_to_string(cell).to_lowercase();
        if !header.is_empty() {
            map.insert(header, col_idx);
        }
    }
    map
}

/// Converts a `calamine::Data` cell to a trimmed `String`.
///
/// Whole-number float cells render without a fractional part — Excel stores
/// numeric codes as floats, so `101.0` must become `"101"`, not `"101.0"`.
/// Empty, blank, and error cells yield an empty string.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_owned(),
        Data::Float(f) => {
            if *f == f.floor() && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
        Data::Empty => String::new(),
    }
}

/// Builds a column reference string like `"B"` from a zero-based column index.
pub fn col_letter(col_idx: usize) -> String {
    let mut n = col_idx + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Formats a cell reference as `"{Sheet}!{Col}{Row}"`.
///
/// `data_row_idx` is zero-based over data rows (row 0 = first row after the
/// header), so it displays with a +2 offset.
pub fn cell_ref(sheet_name: &str, col_idx: usize, data_row_idx: usize) -> String {
    format!("{}!{}{}", sheet_name, col_letter(col_idx), data_row_idx + 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_float_renders_as_integer() {
        assert_eq!(cell_to_string(&Data::Float(101.0)), "101");
    }

    #[test]
    fn fractional_float_keeps_fraction() {
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
    }

    #[test]
    fn string_cell_is_trimmed() {
        assert_eq!(cell_to_string(&Data::String("  0101 ".to_owned())), "0101");
    }

    #[test]
    fn empty_and_error_cells_are_blank() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(
            cell_to_string(&Data::Error(calamine::CellErrorType::Value)),
            ""
        );
    }

    #[test]
    fn col_letters() {
        assert_eq!(col_letter(0), "A");
        assert_eq!(col_letter(1), "B");
        assert_eq!(col_letter(25), "Z");
        assert_eq!(col_letter(26), "AA");
    }

    #[test]
    fn cell_ref_offsets_past_header_row() {
        assert_eq!(cell_ref("HSN_MSTR", 1, 0), "HSN_MSTR!B2");
    }
}
