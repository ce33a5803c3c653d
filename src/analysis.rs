//! The per-sheet pipeline: snapshot, detect, materialize, paginate.

use crate::config::{AppConfig, PageConfig};
use crate::detect::detect_regions;
use crate::error::Result;
use crate::grid::{Grid, GridSource};
use crate::layout::PageLayout;
use crate::paginate::paginate;
use crate::table::materialize_all;
use crate::types::{MergedRegion, Page, Rect, Region, Table};

/// Knobs for [`SheetAnalysis::analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub page: PageConfig,
    pub use_print_area: bool,
    pub use_pagination: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for AnalyzeOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            page: config.page,
            use_print_area: config.analysis.use_print_area,
            use_pagination: config.analysis.use_pagination,
        }
    }
}

/// Structure of one sheet.
#[derive(Debug, Clone)]
pub struct SheetAnalysis {
    pub name: String,
    /// Print area that restricted the analysis, if any.
    pub print_area: Option<Rect>,
    pub data_bounds: Option<Rect>,
    pub grid: Grid,
    pub regions: Vec<Region>,
    pub tables: Vec<Table>,
    pub merges: Vec<MergedRegion>,
    /// Empty when pagination is disabled.
    pub pages: Vec<Page>,
    pub paginated: bool,
    pub dpi: u32,
}

impl SheetAnalysis {
    pub fn analyze<S>(source: &S, sheet: &str, options: &AnalyzeOptions) -> Result<Self>
    where
        S: GridSource + ?Sized,
    {
        options.page.validate()?;

        let print_area = if options.use_print_area {
            source.print_area(sheet)
        } else {
            None
        };

        let grid = Grid::from_source(source, sheet, print_area)?;
        let data_bounds = grid.bounds();
        let regions = detect_regions(&grid);
        let tables = materialize_all(&regions, &grid);

        let merges: Vec<MergedRegion> = source
            .merged_regions(sheet)
            .into_iter()
            .filter(|m| print_area.map_or(true, |area| m.bounds.intersects(&area)))
            .collect();

        let pages = if options.use_pagination {
            paginate(data_bounds, &tables, &merges, &grid, &options.page)
        } else {
            Vec::new()
        };

        log::debug!(
            "{sheet}: {} cells, {} regions, {} merges, {} pages",
            grid.len(),
            regions.len(),
            merges.len(),
            pages.len()
        );

        Ok(Self {
            name: sheet.to_string(),
            print_area,
            data_bounds,
            grid,
            regions,
            tables,
            merges,
            pages,
            paginated: options.use_pagination,
            dpi: options.page.dpi,
        })
    }

    /// True when no populated cell survived the print-area restriction.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    pub fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    /// Figure geometry for every page, in page order.
    pub fn layouts(&self) -> Vec<PageLayout> {
        let total = self.page_count();
        self.pages
            .iter()
            .map(|p| PageLayout::for_page(p, &self.name, total, self.dpi))
            .collect()
    }
}

/// Structure of every sheet of a workbook, in workbook order.
#[derive(Debug, Clone, Default)]
pub struct WorkbookAnalysis {
    pub sheets: Vec<SheetAnalysis>,
    pub paginated: bool,
}

impl WorkbookAnalysis {
    pub fn analyze<S>(source: &S, options: &AnalyzeOptions) -> Result<Self>
    where
        S: GridSource + ?Sized,
    {
        options.page.validate()?;
        let sheets = source
            .sheet_names()
            .iter()
            .map(|name| SheetAnalysis::analyze(source, name, options))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            sheets,
            paginated: options.use_pagination,
        })
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetAnalysis> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
