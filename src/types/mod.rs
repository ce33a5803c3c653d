//! Data types shared by the reader, the detector and the exporters.

mod cell;
mod merge;
mod page;
mod rect;
mod region;
mod table;
mod workbook;

pub use cell::*;
pub use merge::*;
pub use page::*;
pub use rect::*;
pub use region::*;
pub use table::*;
pub use workbook::*;
