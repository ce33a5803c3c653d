use serde::Serialize;
use std::collections::BTreeMap;

use super::{Cell, CellPos};

/// A complete workbook as read from an XLSX archive.
#[derive(Debug, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
    /// Named ranges and defined names from the workbook
    pub defined_names: Vec<DefinedName>,
    /// Whether the workbook uses the 1904 date system
    pub date1904: bool,
}

impl Workbook {
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// A defined name (named range) in the workbook.
///
/// Built-in names use the `_xlnm.` prefix, e.g. `_xlnm.Print_Area`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinedName {
    pub name: String,
    /// The formula/reference value (e.g., "Sheet1!$A$1:$D$10")
    pub value: String,
    /// If present, the name is scoped to this sheet (0-indexed)
    pub local_sheet_id: Option<u32>,
    pub hidden: bool,
}

/// Sheet visibility state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetState {
    #[default]
    Visible,
    Hidden,
    VeryHidden,
}

/// A single worksheet: its populated cells, merges and print area.
#[derive(Debug, Default)]
pub struct Sheet {
    pub name: String,
    pub state: SheetState,
    /// Sparse, row-major cell store. Empty cells are never inserted.
    pub cells: BTreeMap<CellPos, Cell>,
    /// Raw merge references as written in the sheet, e.g. `A1:C1`.
    pub merges: Vec<String>,
    /// Print area with sheet qualifier and `$` removed, e.g. `A1:H50`.
    pub print_area: Option<String>,
}

impl Sheet {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&CellPos::new(row, col))
    }
}
