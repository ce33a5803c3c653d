//! Read access to sheet contents, and the immutable per-sheet snapshot the
//! detector and paginator run over.

use std::collections::BTreeMap;

use crate::cell_ref::parse_range;
use crate::error::{Result, XlscanError};
use crate::types::{Cell, CellPos, CellValue, MergedRegion, Rect, Workbook};

/// Anything that can hand out sheet cells by coordinate.
///
/// Coordinates are 1-based. A source must answer `None` for empty cells.
pub trait GridSource {
    fn sheet_names(&self) -> Vec<String>;

    fn cell_value(&self, sheet: &str, row: u32, col: u32) -> Option<Cell>;

    /// Tight box around populated cells, `None` for an empty sheet.
    fn data_bounds(&self, sheet: &str) -> Option<Rect>;

    fn merged_regions(&self, sheet: &str) -> Vec<MergedRegion>;

    fn print_area(&self, sheet: &str) -> Option<Rect>;

    /// Every populated cell in row-major order.
    ///
    /// The default walks `data_bounds` cell by cell; sources with a sparse
    /// store should override it.
    fn populated_cells(&self, sheet: &str) -> Vec<(CellPos, Cell)> {
        let Some(bounds) = self.data_bounds(sheet) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for row in bounds.min_row..=bounds.max_row {
            for col in bounds.min_col..=bounds.max_col {
                if let Some(cell) = self.cell_value(sheet, row, col) {
                    out.push((CellPos::new(row, col), cell));
                }
            }
        }
        out
    }
}

impl GridSource for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn cell_value(&self, sheet: &str, row: u32, col: u32) -> Option<Cell> {
        self.sheet(sheet)?.cell(row, col).cloned()
    }

    fn data_bounds(&self, sheet: &str) -> Option<Rect> {
        Rect::bounding(self.sheet(sheet)?.cells.keys().copied())
    }

    fn merged_regions(&self, sheet: &str) -> Vec<MergedRegion> {
        let Some(s) = self.sheet(sheet) else {
            return Vec::new();
        };
        s.merges
            .iter()
            .filter_map(|reference| {
                let Some(bounds) = parse_range(reference) else {
                    log::warn!("{sheet}: skipping malformed merge range {reference:?}");
                    return None;
                };
                let value = s
                    .cell(bounds.min_row, bounds.min_col)
                    .map(|c| c.value.clone());
                Some(MergedRegion::new(bounds, value))
            })
            .collect()
    }

    fn print_area(&self, sheet: &str) -> Option<Rect> {
        let raw = self.sheet(sheet)?.print_area.as_deref()?;
        let rect = parse_range(raw);
        if rect.is_none() {
            log::warn!("{sheet}: ignoring malformed print area {raw:?}");
        }
        rect
    }

    fn populated_cells(&self, sheet: &str) -> Vec<(CellPos, Cell)> {
        self.sheet(sheet)
            .map(|s| s.cells.iter().map(|(p, c)| (*p, c.clone())).collect())
            .unwrap_or_default()
    }
}

/// Immutable snapshot of one sheet's populated cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    cells: BTreeMap<CellPos, Cell>,
}

impl Grid {
    /// Snapshot `sheet`, keeping only cells inside `restrict` when given.
    pub fn from_source<S>(source: &S, sheet: &str, restrict: Option<Rect>) -> Result<Self>
    where
        S: GridSource + ?Sized,
    {
        if !source.sheet_names().iter().any(|n| n == sheet) {
            return Err(XlscanError::SheetNotFound(sheet.to_string()));
        }
        let cells = source
            .populated_cells(sheet)
            .into_iter()
            .filter(|(pos, _)| restrict.map_or(true, |r| r.contains(*pos)))
            .collect();
        Ok(Self { cells })
    }

    pub fn get(&self, pos: CellPos) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    pub fn value(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.get(CellPos::new(row, col)).map(|c| &c.value)
    }

    pub fn is_populated(&self, pos: CellPos) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Populated cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, &Cell)> + '_ {
        self.cells.iter().map(|(p, c)| (*p, c))
    }

    /// Populated cells of `rect`, row-major.
    pub fn cells_in(&self, rect: Rect) -> impl Iterator<Item = (CellPos, &Cell)> + '_ {
        self.cells
            .range(rect.top_left()..=CellPos::new(rect.max_row, rect.max_col))
            .filter(move |(p, _)| rect.contains(**p))
            .map(|(p, c)| (*p, c))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Tight bounding box of the snapshot.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.cells.keys().copied())
    }
}

impl FromIterator<(CellPos, Cell)> for Grid {
    fn from_iter<I: IntoIterator<Item = (CellPos, Cell)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, CellValue)> for Grid {
    /// Build from `("B3", value)` pairs; unparseable references are dropped.
    fn from_iter<I: IntoIterator<Item = (&'a str, CellValue)>>(iter: I) -> Self {
        iter.into_iter()
            .filter_map(|(r, v)| Some((crate::cell_ref::parse_cell_ref(r)?, Cell::from(v))))
            .collect()
    }
}
