use serde::Serialize;

use super::{Cell, CellPos, MergedRegion, Rect, TableRef};

/// Per-page counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageStats {
    pub cell_count: usize,
    pub table_count: usize,
    pub merged_count: usize,
}

/// One tile of a paginated sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based, row-major across the tiling.
    pub index: u32,
    /// Tile before overlap extension.
    pub core: Rect,
    /// Tile after overlap extension; membership is decided against this.
    pub rect: Rect,
    /// Cells inside `rect`, row-major.
    pub cells: Vec<(CellPos, Cell)>,
    pub tables: Vec<TableRef>,
    pub merged: Vec<MergedRegion>,
}

impl Page {
    /// `page_001`, `page_002`, ...; widens past 999.
    #[must_use]
    pub fn key(&self) -> String {
        page_key(self.index)
    }

    /// File name a renderer writes for this page.
    #[must_use]
    pub fn image_name(&self, sheet: &str) -> String {
        format!("{sheet}_{}.png", self.key())
    }

    #[must_use]
    pub fn stats(&self) -> PageStats {
        PageStats {
            cell_count: self.cells.len(),
            table_count: self.tables.len(),
            merged_count: self.merged.len(),
        }
    }
}

#[must_use]
pub fn page_key(index: u32) -> String {
    format!("page_{index:03}")
}
