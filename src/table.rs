//! Turn a detected [`Region`] into a [`Table`]: header texts, non-empty data
//! rows with display strings, value-kind counts and an orientation guess.

use std::collections::BTreeMap;

use crate::cell_ref::column_letter;
use crate::grid::Grid;
use crate::types::{Cell, CellValue, Orientation, Region, Rect, Table, TableCell, TableHeader, TableRow};

/// Materialize `region` as the table with 1-based position `index`.
pub fn materialize(region: &Region, grid: &Grid, index: usize) -> Table {
    let bounds = region.bounds;

    let headers: Vec<TableHeader> = match region.header_row {
        Some(row) => grid
            .cells_in(Rect::new(row, row, bounds.min_col, bounds.max_col))
            .map(|(pos, cell)| TableHeader {
                value: cell.value.to_string(),
                column: column_letter(pos.col),
                column_index: pos.col,
            })
            .collect(),
        None => Vec::new(),
    };

    let mut rows: Vec<TableRow> = Vec::new();
    let mut data_types = BTreeMap::new();
    let mut non_empty = 0usize;

    let start = region.data_start_row();
    if start <= bounds.max_row {
        let body = Rect::new(start, bounds.max_row, bounds.min_col, bounds.max_col);
        for (pos, cell) in grid.cells_in(body) {
            let kind = cell.value.kind();
            *data_types.entry(kind).or_insert(0) += 1;
            non_empty += 1;

            let table_cell = TableCell {
                row: pos.row,
                column: pos.col,
                coordinate: pos.coordinate(),
                value: cell.value.clone(),
                kind,
                formatted_value: format_cell(cell),
            };
            match rows.last_mut() {
                Some(last) if last.row_index == pos.row => last.cells.push(table_cell),
                _ => rows.push(TableRow {
                    row_index: pos.row,
                    cells: vec![table_cell],
                }),
            }
        }
    }

    let orientation = orientation(headers.len(), rows.len());

    Table {
        id: format!("T{index}"),
        bounds,
        has_header: region.has_header,
        header_row: region.header_row,
        headers,
        rows,
        orientation,
        data_types,
        non_empty_cells_count: non_empty,
    }
}

/// Materialize every region, numbering tables `T1`, `T2`, ...
pub fn materialize_all(regions: &[Region], grid: &Grid) -> Vec<Table> {
    regions
        .iter()
        .enumerate()
        .map(|(i, region)| materialize(region, grid, i + 1))
        .collect()
}

fn orientation(headers: usize, rows: usize) -> Orientation {
    if headers == 0 {
        Orientation::Unknown
    } else if rows > headers {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

/// Display string for a cell.
///
/// Booleans become `Yes`/`No`. Numbers whose format contains `%` are shown
/// as a percentage with one decimal. Other floats get two decimals.
pub fn format_cell(cell: &Cell) -> String {
    let percent = cell
        .number_format
        .as_deref()
        .is_some_and(|f| f.contains('%'));
    match &cell.value {
        CellValue::Boolean(true) => "Yes".to_string(),
        CellValue::Boolean(false) => "No".to_string(),
        v @ (CellValue::Integer(_) | CellValue::Float(_)) if percent => {
            let n = v.as_f64().unwrap_or_default();
            format!("{:.1}%", n * 100.0)
        }
        CellValue::Float(f) => format!("{f:.2}"),
        other => other.to_string(),
    }
}
