//! Utilities for parsing Excel-style cell references and ranges.
//!
//! Everything in this module is 1-based: `A1` is row 1, column 1.

use crate::types::{CellPos, Rect};

/// Largest column index Excel accepts (`XFD`).
pub const MAX_COL: u32 = 16_384;

/// Largest row index Excel accepts.
pub const MAX_ROW: u32 = 1_048_576;

/// Convert a 1-based column index to its letters (`1` → `A`, `27` → `AA`).
///
/// Returns an empty string for `0`.
pub fn column_letter(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Convert column letters (case-insensitive) to a 1-based index.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(b.to_ascii_uppercase() - b'A') + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    (col <= MAX_COL).then_some(col)
}

/// Format a 1-based position as a coordinate like `B7`.
pub fn coordinate(row: u32, col: u32) -> String {
    format!("{}{row}", column_letter(col))
}

/// Parse a cell reference like `"A1"` or `"$B$12"`.
///
/// Letters must precede digits; anything else (including row 0) is rejected.
pub fn parse_cell_ref(cell_ref: &str) -> Option<CellPos> {
    parse_cell_ref_bytes(cell_ref.trim().as_bytes())
}

/// Bytes equivalent of [`parse_cell_ref`] for raw XML attribute values.
pub fn parse_cell_ref_bytes(ref_bytes: &[u8]) -> Option<CellPos> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for &b in ref_bytes {
        if b == b'$' {
            continue;
        }
        if b.is_ascii_alphabetic() {
            if saw_row {
                return None;
            }
            let upper = b.to_ascii_uppercase();
            col = col.checked_mul(26)?.checked_add(u32::from(upper - b'A') + 1)?;
            saw_col = true;
        } else if b.is_ascii_digit() {
            row = row.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || row == 0 || row > MAX_ROW || col > MAX_COL {
        return None;
    }

    Some(CellPos::new(row, col))
}

/// Parse a range like `"A1:C4"` (or a single cell `"B2"`) into a [`Rect`].
///
/// Corners may be given in any order; the result is normalized.
pub fn parse_range(range: &str) -> Option<Rect> {
    if let Some((start, end)) = range.split_once(':') {
        let a = parse_cell_ref(start)?;
        let b = parse_cell_ref(end)?;
        Some(Rect::spanning(a, b))
    } else {
        parse_cell_ref(range).map(Rect::from_pos)
    }
}

/// Strip the sheet qualifier and `$` markers from a defined-name formula.
///
/// `'My Sheet'!$A$1:$D$10` becomes `A1:D10`. For a comma-separated list of
/// areas only the first one is kept. Returns `None` if nothing remains.
pub fn clean_range(formula: &str) -> Option<String> {
    let first = formula.split(',').next().unwrap_or(formula);
    let range_part = match first.rfind('!') {
        Some(pos) => first.get(pos + 1..).unwrap_or(""),
        None => first,
    };
    let cleaned: String = range_part
        .chars()
        .filter(|c| *c != '$' && !c.is_whitespace())
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}
