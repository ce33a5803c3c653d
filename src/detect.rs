//! Region detection: cluster populated cells into rectangular regions and
//! decide whether each region starts with a header row.
//!
//! Two populated cells belong to the same region when they are within two
//! rows and two columns of each other, so a single blank row or column does
//! not split a table.

use std::collections::{HashSet, VecDeque};

use crate::grid::Grid;
use crate::types::{CellPos, Rect, Region};

/// Neighbourhood reach in each direction.
const REACH: i64 = 2;

/// Header rows need strictly more than 7 text cells in 10.
const HEADER_TEXT_NUM: usize = 7;
const HEADER_TEXT_DEN: usize = 10;

/// Find every multi-cell region in `grid`, in row-major order of their
/// first cell.
pub fn detect_regions(grid: &Grid) -> Vec<Region> {
    let mut visited: HashSet<CellPos> = HashSet::with_capacity(grid.len());
    let mut regions = Vec::new();

    for (seed, _) in grid.iter() {
        if visited.contains(&seed) {
            continue;
        }
        let cells = flood(grid, seed, &mut visited);
        if cells.len() < 2 {
            continue;
        }
        let Some(bounds) = Rect::bounding(cells.iter().copied()) else {
            continue;
        };
        let has_header = is_header_row(grid, bounds.min_row, bounds.min_col, bounds.max_col);
        regions.push(Region {
            bounds,
            cells,
            has_header,
            header_row: has_header.then_some(bounds.min_row),
        });
    }

    log::debug!(
        "detected {} regions over {} cells",
        regions.len(),
        grid.len()
    );
    regions
}

/// Breadth-first walk from `seed`. Each coordinate is examined at most once
/// per region; populated ones are also marked in the global `visited` set.
fn flood(grid: &Grid, seed: CellPos, visited: &mut HashSet<CellPos>) -> Vec<CellPos> {
    let mut seen: HashSet<CellPos> = HashSet::new();
    let mut queue = VecDeque::from([seed]);
    let mut members = Vec::new();
    seen.insert(seed);

    while let Some(pos) = queue.pop_front() {
        if !grid.is_populated(pos) {
            continue;
        }
        visited.insert(pos);
        members.push(pos);

        for dr in -REACH..=REACH {
            for dc in -REACH..=REACH {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let Some(next) = offset(pos, dr, dc) else {
                    continue;
                };
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    members
}

/// Shift `pos`, rejecting anything above row 1 or left of column 1.
fn offset(pos: CellPos, dr: i64, dc: i64) -> Option<CellPos> {
    let row = u32::try_from(i64::from(pos.row) + dr).ok()?;
    let col = u32::try_from(i64::from(pos.col) + dc).ok()?;
    (row >= 1 && col >= 1).then_some(CellPos::new(row, col))
}

/// True when more than 70% of the populated cells of `row` between
/// `min_col` and `max_col` hold text.
pub fn is_header_row(grid: &Grid, row: u32, min_col: u32, max_col: u32) -> bool {
    let mut text = 0usize;
    let mut total = 0usize;
    for (_, cell) in grid.cells_in(Rect::new(row, row, min_col, max_col)) {
        total += 1;
        if cell.value.is_text() {
            text += 1;
        }
    }
    total > 0 && text * HEADER_TEXT_DEN > total * HEADER_TEXT_NUM
}
