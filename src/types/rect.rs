use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

use super::CellPos;
use crate::cell_ref::coordinate;

/// Inclusive rectangle of 1-based cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
}

impl Rect {
    /// Build a rectangle, swapping bounds given in the wrong order.
    #[must_use]
    pub fn new(min_row: u32, max_row: u32, min_col: u32, max_col: u32) -> Self {
        Self {
            min_row: min_row.min(max_row),
            max_row: min_row.max(max_row),
            min_col: min_col.min(max_col),
            max_col: min_col.max(max_col),
        }
    }

    #[must_use]
    pub const fn from_pos(pos: CellPos) -> Self {
        Self {
            min_row: pos.row,
            max_row: pos.row,
            min_col: pos.col,
            max_col: pos.col,
        }
    }

    /// Smallest rectangle containing both corners.
    #[must_use]
    pub fn spanning(a: CellPos, b: CellPos) -> Self {
        Self::new(a.row, b.row, a.col, b.col)
    }

    /// Tight bounding box of a set of positions, `None` when empty.
    pub fn bounding<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = CellPos>,
    {
        positions.into_iter().fold(None, |acc, pos| {
            Some(match acc {
                None => Self::from_pos(pos),
                Some(r) => r.expand_to(pos),
            })
        })
    }

    #[must_use]
    pub fn expand_to(self, pos: CellPos) -> Self {
        Self {
            min_row: self.min_row.min(pos.row),
            max_row: self.max_row.max(pos.row),
            min_col: self.min_col.min(pos.col),
            max_col: self.max_col.max(pos.col),
        }
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.max_row - self.min_row + 1
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.max_col - self.min_col + 1
    }

    #[must_use]
    pub const fn top_left(&self) -> CellPos {
        CellPos::new(self.min_row, self.min_col)
    }

    #[must_use]
    pub const fn contains(&self, pos: CellPos) -> bool {
        pos.row >= self.min_row
            && pos.row <= self.max_row
            && pos.col >= self.min_col
            && pos.col <= self.max_col
    }

    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.min_row >= self.min_row
            && other.max_row <= self.max_row
            && other.min_col >= self.min_col
            && other.max_col <= self.max_col
    }

    /// True when the two rectangles share at least one cell.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        !(self.max_row < other.min_row
            || self.min_row > other.max_row
            || self.max_col < other.min_col
            || self.min_col > other.max_col)
    }

    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        self.intersects(other).then(|| Self {
            min_row: self.min_row.max(other.min_row),
            max_row: self.max_row.min(other.max_row),
            min_col: self.min_col.max(other.min_col),
            max_col: self.max_col.min(other.max_col),
        })
    }

    /// Number of cells covered.
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.height()) * u64::from(self.width())
    }

    /// `A1:C4` form. A single cell still renders both corners.
    #[must_use]
    pub fn to_a1(&self) -> String {
        format!(
            "{}:{}",
            coordinate(self.min_row, self.min_col),
            coordinate(self.max_row, self.max_col)
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// Serializes as `{min_row, max_row, min_col, max_col, range}`.
impl Serialize for Rect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Rect", 5)?;
        s.serialize_field("min_row", &self.min_row)?;
        s.serialize_field("max_row", &self.max_row)?;
        s.serialize_field("min_col", &self.min_col)?;
        s.serialize_field("max_col", &self.max_col)?;
        s.serialize_field("range", &self.to_a1())?;
        s.end()
    }
}

/// `serialize_with` helper for fields that should appear as a bare `A1:C4`
/// string (or `null`).
pub fn serialize_a1<S: Serializer>(rect: &Option<Rect>, serializer: S) -> Result<S::Ok, S::Error> {
    match rect {
        Some(r) => serializer.collect_str(r),
        None => serializer.serialize_none(),
    }
}
