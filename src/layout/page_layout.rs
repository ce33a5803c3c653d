use serde::Serialize;

use crate::cell_ref::column_letter;
use crate::types::{Page, Rect};

/// Width of one cell in the page figure, in tenths of an inch.
const CELL_WIDTH_TENTHS: u32 = 25;
/// Height of one cell in the page figure, in tenths of an inch.
const CELL_HEIGHT_TENTHS: u32 = 8;
const MAX_WIDTH_TENTHS: u32 = 200;
const MAX_HEIGHT_TENTHS: u32 = 140;

/// Fill colours cycled through by table boxes.
pub const TABLE_PALETTE: [&str; 5] = ["#E8F4FD", "#E8F5E9", "#FFF8E1", "#FCE4EC", "#F3E5F5"];
pub const TABLE_EDGE: &str = "#2196F3";
pub const MERGE_FILL: &str = "#FFF59D";
pub const MERGE_EDGE: &str = "#F57C00";

const MERGE_LABEL_MAX: usize = 50;
/// Characters that fit in one cell at the default font size.
const CELL_LABEL_MAX: usize = 15;

/// A rectangle in page-local, 0-based cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalRect {
    pub row: u32,
    pub col: u32,
    pub rows: u32,
    pub cols: u32,
}

impl LocalRect {
    /// Clip `rect` to `page` and shift it so the page's top-left is (0, 0).
    pub fn clip(rect: &Rect, page: &Rect) -> Option<Self> {
        let clipped = rect.intersection(page)?;
        Some(Self {
            row: clipped.min_row - page.min_row,
            col: clipped.min_col - page.min_col,
            rows: clipped.height(),
            cols: clipped.width(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableBox {
    pub id: String,
    pub label: String,
    pub area: LocalRect,
    pub fill: &'static str,
    pub edge: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeBox {
    pub range: String,
    pub area: LocalRect,
    /// Anchor text, shortened; absent when the anchor is blank.
    pub label: Option<String>,
    pub fill: &'static str,
    pub edge: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellLabel {
    pub row: u32,
    pub col: u32,
    pub text: String,
    pub font_size: u8,
}

/// Everything a renderer needs to draw one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub title: String,
    pub rows: u32,
    pub cols: u32,
    pub width_in: f64,
    pub height_in: f64,
    pub width_px: u32,
    pub height_px: u32,
    pub col_labels: Vec<String>,
    pub row_labels: Vec<u32>,
    pub tables: Vec<TableBox>,
    pub merges: Vec<MergeBox>,
    pub cells: Vec<CellLabel>,
}

impl PageLayout {
    pub fn for_page(page: &Page, sheet: &str, total_pages: u32, dpi: u32) -> Self {
        let area = page.rect;
        let rows = area.height();
        let cols = area.width();

        let width_tenths = cols.saturating_mul(CELL_WIDTH_TENTHS).min(MAX_WIDTH_TENTHS);
        let height_tenths = rows.saturating_mul(CELL_HEIGHT_TENTHS).min(MAX_HEIGHT_TENTHS);

        let tables = page
            .tables
            .iter()
            .filter_map(|t| {
                let local = LocalRect::clip(&t.bounds, &area)?;
                let colour = TABLE_PALETTE
                    .get(t.ordinal.saturating_sub(1) % TABLE_PALETTE.len())
                    .copied()
                    .unwrap_or(TABLE_EDGE);
                Some(TableBox {
                    id: t.id.clone(),
                    label: format!("Table {}", t.ordinal),
                    area: local,
                    fill: colour,
                    edge: TABLE_EDGE,
                })
            })
            .collect();

        let merges = page
            .merged
            .iter()
            .filter_map(|m| {
                let local = LocalRect::clip(&m.bounds, &area)?;
                let text = m.text();
                Some(MergeBox {
                    range: m.bounds.to_a1(),
                    area: local,
                    label: (!text.is_empty()).then(|| shorten(&text, MERGE_LABEL_MAX, "...")),
                    fill: MERGE_FILL,
                    edge: MERGE_EDGE,
                })
            })
            .collect();

        let cells = page
            .cells
            .iter()
            .map(|(pos, cell)| {
                let text = shorten(&cell.value.to_string(), CELL_LABEL_MAX, "..");
                CellLabel {
                    row: pos.row - area.min_row,
                    col: pos.col - area.min_col,
                    font_size: font_size(&text),
                    text,
                }
            })
            .collect();

        Self {
            title: format!(
                "{sheet} - Page {}/{total_pages} (Range: {})",
                page.index,
                area.to_a1()
            ),
            rows,
            cols,
            width_in: f64::from(width_tenths) / 10.0,
            height_in: f64::from(height_tenths) / 10.0,
            width_px: width_tenths.saturating_mul(dpi) / 10,
            height_px: height_tenths.saturating_mul(dpi) / 10,
            col_labels: (area.min_col..=area.max_col).map(column_letter).collect(),
            row_labels: (area.min_row..=area.max_row).collect(),
            tables,
            merges,
            cells,
        }
    }
}

/// Cut `text` to at most `max` characters, ending in `suffix` when cut.
fn shorten(text: &str, max: usize, suffix: &str) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(suffix.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

fn font_size(text: &str) -> u8 {
    match text.chars().count() {
        0..=9 => 9,
        10..=19 => 8,
        _ => 7,
    }
}
