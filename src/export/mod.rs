//! Output files for an analysed workbook.
//!
//! The main JSON document is always written. Pretty mode also writes one
//! JSON file per page under a directory named after the sheet, and the
//! Markdown table dump is written unless disabled.

pub mod json;
pub mod markdown;

use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::WorkbookAnalysis;
use crate::config::ExportConfig;
use crate::error::Result;

/// Write every output file into `dir`, creating it if needed.
///
/// Returns the written paths in the order they were written.
pub fn write_outputs(
    dir: &Path,
    analysis: &WorkbookAnalysis,
    config: &ExportConfig,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let main_name = if analysis.paginated {
        json::PAGED_FILE
    } else {
        json::FLAT_FILE
    };
    let main_path = dir.join(main_name);
    fs::write(&main_path, json::to_json_string(analysis, config.compact_json)?)?;
    written.push(main_path);

    if analysis.paginated && !config.compact_json {
        for sheet in analysis.sheets.iter().filter(|s| !s.pages.is_empty()) {
            let sheet_dir = dir.join(&sheet.name);
            fs::create_dir_all(&sheet_dir)?;
            for (page, layout) in sheet.pages.iter().zip(sheet.layouts()) {
                let path = sheet_dir.join(format!("{}.json", page.key()));
                fs::write(&path, json::page_json_string(sheet, page, &layout)?)?;
                written.push(path);
            }
        }
    }

    if config.write_markdown {
        let path = dir.join(markdown::TABLES_FILE);
        fs::write(&path, markdown::render_tables(analysis))?;
        written.push(path);
    }

    for path in &written {
        log::info!("Written: {}", path.display());
    }
    Ok(written)
}
