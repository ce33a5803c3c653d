//! Page figure geometry.
//!
//! This module computes what a renderer needs to draw a page:
//! - figure size in inches and pixels
//! - table and merge boxes clipped to the page, in page-local cell units
//! - shortened cell labels with a font size hint

mod page_layout;

pub use page_layout::{
    CellLabel, LocalRect, MergeBox, PageLayout, TableBox, MERGE_EDGE, MERGE_FILL, TABLE_EDGE,
    TABLE_PALETTE,
};
