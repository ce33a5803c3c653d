use serde::Serialize;

use super::{CellPos, Rect};

/// How a detected region is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Table,
    DataRegion,
}

/// A cluster of populated cells found by the region detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub bounds: Rect,
    /// Member cells in discovery order.
    #[serde(skip)]
    pub cells: Vec<CellPos>,
    pub has_header: bool,
    pub header_row: Option<u32>,
}

impl Region {
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub const fn kind(&self) -> RegionKind {
        if self.has_header {
            RegionKind::Table
        } else {
            RegionKind::DataRegion
        }
    }

    /// First row holding data rather than headers.
    #[must_use]
    pub const fn data_start_row(&self) -> u32 {
        match self.header_row {
            Some(row) => row + 1,
            None => self.bounds.min_row,
        }
    }
}
