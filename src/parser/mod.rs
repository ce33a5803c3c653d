//! Main XLSX parser
//!
//! Orchestrates the parsing of all components from the ZIP archive.

mod shared_strings;
mod worksheet;

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use crate::error::Result;
use crate::styles::{parse_number_formats, NumberFormats};
use crate::types::{Sheet, Workbook};
use crate::workbook_meta::{
    apply_defined_names_to_sheets, parse_workbook_relationships, parse_workbook_xml,
    WorkbookRelationships,
};

use shared_strings::parse_shared_strings;
use worksheet::{parse_sheet, SheetContext};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

/// Parse an XLSX file from bytes.
pub fn parse(data: &[u8]) -> Result<Workbook> {
    parse_reader(Cursor::new(data))
}

/// Parse an XLSX file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Workbook> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

/// Parse an XLSX archive from any seekable reader.
pub fn parse_reader<R: Read + Seek>(reader: R) -> Result<Workbook> {
    let mut archive = ZipArchive::new(reader)?;

    // Relationships, shared strings and styles are optional parts.
    let relationships = match archive.by_name(WORKBOOK_RELS_PART) {
        Ok(file) => parse_workbook_relationships(BufReader::new(file))?,
        Err(_) => WorkbookRelationships::default(),
    };

    let sst_path = relationships
        .shared_strings
        .as_deref()
        .unwrap_or("xl/sharedStrings.xml");
    let shared_strings = match archive.by_name(sst_path) {
        Ok(file) => parse_shared_strings(BufReader::new(file))?,
        Err(_) => Vec::new(),
    };

    let styles_path = relationships.styles.as_deref().unwrap_or("xl/styles.xml");
    let formats = match archive.by_name(styles_path) {
        Ok(file) => parse_number_formats(BufReader::new(file))?,
        Err(_) => NumberFormats::default(),
    };

    let meta = {
        let file = archive.by_name(WORKBOOK_PART)?;
        parse_workbook_xml(BufReader::new(file), &relationships.worksheets)?
    };

    let ctx = SheetContext {
        shared_strings: &shared_strings,
        formats: &formats,
        date1904: meta.date1904,
    };

    let mut sheets = Vec::with_capacity(meta.sheets.len());
    for info in &meta.sheets {
        let mut sheet = Sheet::new(&info.name);
        sheet.state = info.state;
        match archive.by_name(&info.path) {
            Ok(file) => {
                let data = parse_sheet(BufReader::new(file), &info.name, &ctx)?;
                sheet.cells = data.cells;
                sheet.merges = data.merges;
            }
            Err(err) => log::warn!("{}: worksheet part {} unreadable: {err}", info.name, info.path),
        }
        sheets.push(sheet);
    }

    apply_defined_names_to_sheets(&mut sheets, &meta.defined_names);

    log::debug!(
        "parsed {} sheets, {} shared strings, {} cell styles",
        sheets.len(),
        shared_strings.len(),
        formats.len()
    );

    Ok(Workbook {
        sheets,
        defined_names: meta.defined_names,
        date1904: meta.date1904,
    })
}
