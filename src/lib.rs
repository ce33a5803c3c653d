//! xlscan - table detection and pagination for XLSX sheets
//!
//! Reads a workbook and describes the structure of every sheet:
//! - clusters of populated cells and whether they start with a header row
//! - materialized tables with display strings and value-kind counts
//! - merged ranges with their anchor values
//! - overlapping fixed-size pages, each with figure geometry for a renderer
//!
//! # Usage
//!
//! ```no_run
//! use xlscan::{analysis::AnalyzeOptions, analysis::WorkbookAnalysis, config::AppConfig};
//!
//! # fn main() -> xlscan::error::Result<()> {
//! let workbook = xlscan::parser::parse_file("report.xlsx")?;
//! let config = AppConfig::default();
//! let analysis = WorkbookAnalysis::analyze(&workbook, &AnalyzeOptions::from(&config))?;
//! xlscan::export::write_outputs("out".as_ref(), &analysis, &config.export)?;
//! # Ok(())
//! # }
//! ```

// Reading
pub mod cell_ref;
pub mod error;
pub mod numfmt;
pub mod parser;
pub mod styles;
pub mod types;
pub mod workbook_meta;
pub mod xml_helpers;

// Structure
pub mod analysis;
pub mod config;
pub mod detect;
pub mod grid;
pub mod paginate;
pub mod table;

// Output
pub mod export;
pub mod layout;

pub use analysis::{AnalyzeOptions, SheetAnalysis, WorkbookAnalysis};
pub use config::AppConfig;
pub use error::{Result, XlscanError};
pub use grid::{Grid, GridSource};
pub use types::*;
