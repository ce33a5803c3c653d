//! Split a sheet's data extent into overlapping pages.
//!
//! Pages are laid out row-major. Each page's core rectangle is
//! `rows_per_page` by `cols_per_page` cells clamped to the data bounds;
//! every page that is not the last in its row or column is then extended by
//! `overlap` cells so neighbouring pages share context.

use crate::config::PageConfig;
use crate::grid::Grid;
use crate::types::{MergedRegion, Page, Rect, Table, TableRef};

/// One tile of the page grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// 1-based, row-major.
    pub index: u32,
    pub core: Rect,
    /// `core` plus overlap, clamped to the data bounds.
    pub rect: Rect,
}

/// Number of pages `bounds` is split into.
pub fn page_count(bounds: Rect, config: &PageConfig) -> u32 {
    let (rows, cols) = grid_dims(bounds, config);
    rows.saturating_mul(cols)
}

fn grid_dims(bounds: Rect, config: &PageConfig) -> (u32, u32) {
    if config.rows_per_page == 0 || config.cols_per_page == 0 {
        return (0, 0);
    }
    (
        bounds.height().div_ceil(config.rows_per_page),
        bounds.width().div_ceil(config.cols_per_page),
    )
}

/// Tile `bounds` without looking at any content.
pub fn page_cores(bounds: Rect, config: &PageConfig) -> Vec<Tile> {
    let (row_pages, col_pages) = grid_dims(bounds, config);
    let mut tiles = Vec::new();
    let mut index = 0u32;

    for row_page in 0..row_pages {
        for col_page in 0..col_pages {
            index += 1;

            let min_row = bounds.min_row + row_page * config.rows_per_page;
            let max_row = min_row
                .saturating_add(config.rows_per_page - 1)
                .min(bounds.max_row);
            let min_col = bounds.min_col + col_page * config.cols_per_page;
            let max_col = min_col
                .saturating_add(config.cols_per_page - 1)
                .min(bounds.max_col);
            let core = Rect::new(min_row, max_row, min_col, max_col);

            let mut rect = core;
            if row_page + 1 < row_pages {
                rect.max_row = max_row.saturating_add(config.overlap).min(bounds.max_row);
            }
            if col_page + 1 < col_pages {
                rect.max_col = max_col.saturating_add(config.overlap).min(bounds.max_col);
            }

            tiles.push(Tile { index, core, rect });
        }
    }
    tiles
}

/// Build the pages of a sheet.
///
/// Cells are assigned to every page whose rectangle contains them. Tables
/// and merges are listed on every page they intersect, unclipped.
pub fn paginate(
    bounds: Option<Rect>,
    tables: &[Table],
    merges: &[MergedRegion],
    grid: &Grid,
    config: &PageConfig,
) -> Vec<Page> {
    let Some(bounds) = bounds else {
        return Vec::new();
    };

    let pages: Vec<Page> = page_cores(bounds, config)
        .into_iter()
        .map(|tile| Page {
            index: tile.index,
            core: tile.core,
            rect: tile.rect,
            cells: grid
                .cells_in(tile.rect)
                .map(|(pos, cell)| (pos, cell.clone()))
                .collect(),
            tables: tables
                .iter()
                .enumerate()
                .filter(|(_, t)| t.bounds.intersects(&tile.rect))
                .map(|(i, t)| TableRef::new(t, i + 1))
                .collect(),
            merged: merges
                .iter()
                .filter(|m| m.bounds.intersects(&tile.rect))
                .cloned()
                .collect(),
        })
        .collect();

    log::debug!("paginated {} into {} pages", bounds, pages.len());
    pages
}
