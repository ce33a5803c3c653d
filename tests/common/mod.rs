//! Common test utilities and assertion helpers.
//!
//! Helpers that run fixture workbooks through the reader and the analysis
//! pipeline, plus small lookups over the results.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use xlscan::analysis::{AnalyzeOptions, SheetAnalysis, WorkbookAnalysis};
use xlscan::cell_ref::parse_cell_ref;
use xlscan::config::PageConfig;
use xlscan::types::{CellValue, Workbook};

// Re-export fixtures for convenience
pub use super::fixtures::*;

/// Parse XLSX bytes, panicking on failure.
#[must_use]
pub fn parse_xlsx(data: &[u8]) -> Workbook {
    xlscan::parser::parse(data).expect("fixture should parse")
}

/// Parse and analyse XLSX bytes.
#[must_use]
pub fn analyze_xlsx(data: &[u8], options: &AnalyzeOptions) -> WorkbookAnalysis {
    WorkbookAnalysis::analyze(&parse_xlsx(data), options).expect("fixture should analyse")
}

/// Options with the given page size and overlap, everything else default.
#[must_use]
pub fn paged(rows_per_page: u32, cols_per_page: u32, overlap: u32) -> AnalyzeOptions {
    AnalyzeOptions {
        page: PageConfig {
            rows_per_page,
            cols_per_page,
            overlap,
            ..PageConfig::default()
        },
        ..AnalyzeOptions::default()
    }
}

/// Look up a sheet of an analysis by name.
#[must_use]
pub fn sheet<'a>(analysis: &'a WorkbookAnalysis, name: &str) -> &'a SheetAnalysis {
    analysis
        .sheet(name)
        .unwrap_or_else(|| panic!("sheet {name} missing"))
}

/// Value of an `A1`-style cell, `None` when the cell is empty.
#[must_use]
pub fn value_at<'a>(workbook: &'a Workbook, sheet: &str, coord: &str) -> Option<&'a CellValue> {
    let pos = parse_cell_ref(coord).expect("valid coordinate");
    workbook
        .sheet(sheet)
        .and_then(|s| s.cell(pos.row, pos.col))
        .map(|c| &c.value)
}

/// Assert a text cell.
pub fn assert_text(workbook: &Workbook, sheet: &str, coord: &str, expected: &str) {
    match value_at(workbook, sheet, coord) {
        Some(CellValue::Text(t)) => assert_eq!(t, expected, "{sheet}!{coord}"),
        other => panic!("{sheet}!{coord}: expected text {expected:?}, got {other:?}"),
    }
}
