use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::{CellKind, CellValue, Rect};

/// Guessed layout of a table's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// One record per row under a header line.
    Vertical,
    /// Fewer data rows than header columns.
    Horizontal,
    /// No headers to reason about.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableHeader {
    pub value: String,
    /// Column letters, e.g. `B`.
    pub column: String,
    pub column_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub row: u32,
    pub column: u32,
    pub coordinate: String,
    pub value: CellValue,
    #[serde(rename = "type")]
    pub kind: CellKind,
    pub formatted_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub row_index: u32,
    pub cells: Vec<TableCell>,
}

/// A materialized table: header texts plus non-empty data cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// `T1`, `T2`, ... in detection order.
    pub id: String,
    pub bounds: Rect,
    pub has_header: bool,
    pub header_row: Option<u32>,
    pub headers: Vec<TableHeader>,
    pub rows: Vec<TableRow>,
    pub orientation: Orientation,
    pub data_types: BTreeMap<CellKind, usize>,
    pub non_empty_cells_count: usize,
}

impl Table {
    /// Header text for a 1-based sheet column, if that column has one.
    #[must_use]
    pub fn header_for(&self, column_index: u32) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.column_index == column_index)
            .map(|h| h.value.as_str())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Table", 10)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("range", &self.bounds.to_a1())?;
        s.serialize_field("bounds", &self.bounds)?;
        s.serialize_field("has_header", &self.has_header)?;
        s.serialize_field("header_row", &self.header_row)?;
        s.serialize_field("headers", &self.headers)?;
        s.serialize_field("data", &self.rows)?;
        s.serialize_field("data_types", &self.data_types)?;
        s.serialize_field("alignment", &self.orientation)?;
        s.serialize_field("non_empty_cells_count", &self.non_empty_cells_count)?;
        s.end()
    }
}

/// A table as seen from a page: identity and extent only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub id: String,
    /// 1-based position in the sheet's table list.
    pub ordinal: usize,
    pub bounds: Rect,
    pub has_header: bool,
    pub orientation: Orientation,
}

impl TableRef {
    #[must_use]
    pub fn new(table: &Table, ordinal: usize) -> Self {
        Self {
            id: table.id.clone(),
            ordinal,
            bounds: table.bounds,
            has_header: table.has_header,
            orientation: table.orientation,
        }
    }
}

impl Serialize for TableRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TableRef", 4)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("range", &self.bounds.to_a1())?;
        s.serialize_field("has_header", &self.has_header)?;
        s.serialize_field("alignment", &self.orientation)?;
        s.end()
    }
}
