//! JSON documents for analysed workbooks.
//!
//! `serde_json` maps sort their keys, which would put `A10` before `A2` and
//! reorder sheets. Everything here is serialized straight from the analysis
//! through borrowed views so that cells stay row-major, pages stay in
//! traversal order and sheets stay in workbook order.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::analysis::{SheetAnalysis, WorkbookAnalysis};
use crate::error::Result;
use crate::grid::Grid;
use crate::layout::PageLayout;
use crate::types::{serialize_a1, Cell, CellPos, Page, Rect};

/// Main output file name for each mode.
pub const PAGED_FILE: &str = "paged_data.json";
pub const FLAT_FILE: &str = "structured_data.json";

/// Serialize the whole workbook analysis.
pub fn to_json_string(analysis: &WorkbookAnalysis, compact: bool) -> Result<String> {
    let doc = WorkbookDocument(analysis);
    let json = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    Ok(json)
}

/// Pretty JSON for a single page: its entry plus the figure layout.
pub fn page_json_string(sheet: &SheetAnalysis, page: &Page, layout: &PageLayout) -> Result<String> {
    let doc = PageDocument {
        entry: PageEntry {
            sheet: &sheet.name,
            page,
        },
        layout,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Name of the single-sheet figure a renderer writes in flat mode.
pub fn structure_image_name(sheet: &str) -> String {
    format!("{sheet}_structure.png")
}

struct WorkbookDocument<'a>(&'a WorkbookAnalysis);

impl Serialize for WorkbookDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let analysis = self.0;
        let mut map = serializer.serialize_map(Some(analysis.sheets.len()))?;
        for sheet in &analysis.sheets {
            if analysis.paginated {
                map.serialize_entry(&sheet.name, &PagedSheet(sheet))?;
            } else {
                map.serialize_entry(&sheet.name, &FlatSheet(sheet))?;
            }
        }
        map.end()
    }
}

struct GridCells<'a>(&'a Grid);

impl Serialize for GridCells<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(pos, cell)| (pos.coordinate(), cell)))
    }
}

struct PageCells<'a>(&'a [(CellPos, Cell)]);

impl Serialize for PageCells<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(pos, cell)| (pos.coordinate(), cell)))
    }
}

struct A1<'a>(&'a Option<Rect>);

impl Serialize for A1<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_a1(self.0, serializer)
    }
}

struct FlatSheet<'a>(&'a SheetAnalysis);

impl Serialize for FlatSheet<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let sheet = self.0;
        let mut s = serializer.serialize_struct("FlatSheet", 6)?;
        s.serialize_field("cells", &GridCells(&sheet.grid))?;
        s.serialize_field("tables", &sheet.tables)?;
        s.serialize_field("merged", &sheet.merges)?;
        s.serialize_field("print_area", &A1(&sheet.print_area))?;
        s.serialize_field("data_bounds", &sheet.data_bounds)?;
        s.serialize_field("visualization", &structure_image_name(&sheet.name))?;
        s.end()
    }
}

struct PagedSheet<'a>(&'a SheetAnalysis);

impl Serialize for PagedSheet<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let sheet = self.0;
        let mut s = serializer.serialize_struct("PagedSheet", 2)?;
        s.serialize_field("meta", &SheetMeta(sheet))?;
        s.serialize_field("pages", &PageMap(sheet))?;
        s.end()
    }
}

struct SheetMeta<'a>(&'a SheetAnalysis);

impl Serialize for SheetMeta<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let sheet = self.0;
        let mut s = serializer.serialize_struct("SheetMeta", 6)?;
        s.serialize_field("print_area", &A1(&sheet.print_area))?;
        s.serialize_field("data_bounds", &sheet.data_bounds)?;
        s.serialize_field("total_cells", &sheet.cell_count())?;
        s.serialize_field("total_tables", &sheet.tables.len())?;
        s.serialize_field("total_merged", &sheet.merges.len())?;
        s.serialize_field("page_count", &sheet.page_count())?;
        s.end()
    }
}

struct PageMap<'a>(&'a SheetAnalysis);

impl Serialize for PageMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let sheet = self.0;
        serializer.collect_map(sheet.pages.iter().map(|page| {
            (
                page.key(),
                PageEntry {
                    sheet: &sheet.name,
                    page,
                },
            )
        }))
    }
}

struct PageEntry<'a> {
    sheet: &'a str,
    page: &'a Page,
}

impl Serialize for PageEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let page = self.page;
        let mut s = serializer.serialize_struct("PageEntry", 6)?;
        s.serialize_field("image", &page.image_name(self.sheet))?;
        s.serialize_field("range", &page.rect.to_a1())?;
        s.serialize_field("cells", &PageCells(&page.cells))?;
        s.serialize_field("tables", &page.tables)?;
        s.serialize_field("merged", &page.merged)?;
        s.serialize_field("stats", &page.stats())?;
        s.end()
    }
}

struct PageDocument<'a> {
    entry: PageEntry<'a>,
    layout: &'a PageLayout,
}

impl Serialize for PageDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PageDocument", 2)?;
        s.serialize_field("page", &self.entry)?;
        s.serialize_field("layout", self.layout)?;
        s.end()
    }
}
