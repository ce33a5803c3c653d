//! Test fixtures for generating valid XLSX files in memory.
//!
//! This module provides builders for creating XLSX files programmatically,
//! useful for testing the xlscan reader and pipeline with known inputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{SheetBuilder, XlsxBuilder};
//!
//! let xlsx = XlsxBuilder::new()
//!     .sheet(
//!         SheetBuilder::new("Sales")
//!             .cell("A1", "Region")
//!             .formatted_cell("B1", 0.25, "0.0%")
//!             .merge("D1:E1")
//!             .print_area("$A$1:$B$20"),
//!     )
//!     .build();
//!
//! let workbook = xlscan::parser::parse(&xlsx).unwrap();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

// ============================================================================
// Cell Value
// ============================================================================

/// Represents a cell value that can be added to a sheet.
#[derive(Debug, Clone)]
pub enum CellValue {
    /// A shared string value.
    String(String),
    /// A numeric value, written with Rust's shortest float form.
    Number(f64),
    /// A numeric value written without a decimal point.
    Integer(i64),
    Boolean(bool),
    /// An error value (e.g., "#DIV/0!").
    Error(String),
    /// An inline string (not shared).
    InlineString(String),
    /// A formula string result (`t="str"`).
    FormulaString(String),
    /// An empty cell (style only).
    Empty,
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Integer(i64::from(n))
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Integer(i64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

// ============================================================================
// Sheet Builder
// ============================================================================

/// A cell in the sheet.
#[derive(Debug, Clone)]
pub struct CellEntry {
    pub cell_ref: String,
    pub value: CellValue,
    pub number_format: Option<String>,
}

/// Builder for a single worksheet.
#[derive(Debug, Clone, Default)]
pub struct SheetBuilder {
    pub name: String,
    pub cells: Vec<CellEntry>,
    pub merges: Vec<String>,
    pub print_area: Option<String>,
    pub state: Option<String>,
    /// Replaces the generated `<sheetData>` body when set.
    pub raw_sheet_data: Option<String>,
}

impl SheetBuilder {
    /// Create a new sheet builder with the given name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Add a cell with a value.
    #[must_use]
    pub fn cell<V: Into<CellValue>>(mut self, cell_ref: &str, value: V) -> Self {
        self.cells.push(CellEntry {
            cell_ref: cell_ref.to_string(),
            value: value.into(),
            number_format: None,
        });
        self
    }

    /// Add a cell with a number format code.
    #[must_use]
    pub fn formatted_cell<V: Into<CellValue>>(mut self, cell_ref: &str, value: V, format: &str) -> Self {
        self.cells.push(CellEntry {
            cell_ref: cell_ref.to_string(),
            value: value.into(),
            number_format: Some(format.to_string()),
        });
        self
    }

    /// Fill a block row by row, starting at 1-based `(row, col)`.
    #[must_use]
    pub fn rows<V: Into<CellValue> + Clone>(mut self, row: u32, col: u32, rows: &[Vec<V>]) -> Self {
        for (r, values) in rows.iter().enumerate() {
            for (c, value) in values.iter().enumerate() {
                let cell_ref = format!("{}{}", col_num_to_letter(col + c as u32), row + r as u32);
                self = self.cell(&cell_ref, value.clone());
            }
        }
        self
    }

    /// Add a merge range (e.g., "A1:B2").
    #[must_use]
    pub fn merge(mut self, range: &str) -> Self {
        self.merges.push(range.to_string());
        self
    }

    /// Define `_xlnm.Print_Area` for this sheet. The sheet qualifier is added.
    #[must_use]
    pub fn print_area(mut self, range: &str) -> Self {
        self.print_area = Some(range.to_string());
        self
    }

    /// Set the visibility state (`hidden`, `veryHidden`).
    #[must_use]
    pub fn state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }

    /// Use hand-written rows instead of the generated cells.
    #[must_use]
    pub fn raw_sheet_data(mut self, xml: &str) -> Self {
        self.raw_sheet_data = Some(xml.to_string());
        self
    }
}

// ============================================================================
// XLSX Builder
// ============================================================================

/// Builder for creating complete XLSX files.
#[derive(Debug, Default)]
pub struct XlsxBuilder {
    sheets: Vec<SheetBuilder>,
    date1904: bool,
    /// Defined names written verbatim: (name, localSheetId, formula).
    extra_names: Vec<(String, Option<u32>, String)>,
}

impl XlsxBuilder {
    /// Create a new XLSX builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new sheet.
    #[must_use]
    pub fn sheet(mut self, sheet: SheetBuilder) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Use the 1904 date system.
    #[must_use]
    pub fn date1904(mut self) -> Self {
        self.date1904 = true;
        self
    }

    /// Add an arbitrary defined name.
    #[must_use]
    pub fn defined_name(mut self, name: &str, local_sheet_id: Option<u32>, formula: &str) -> Self {
        self.extra_names
            .push((name.to_string(), local_sheet_id, formula.to_string()));
        self
    }

    /// Build the XLSX file as bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        // Collect all unique number formats and shared strings
        let mut formats = FormatCollector::default();
        let mut shared_strings: Vec<String> = Vec::new();
        for sheet in &self.sheets {
            for cell in &sheet.cells {
                if let Some(ref code) = cell.number_format {
                    formats.add(code);
                }
                if let CellValue::String(ref s) = cell.value {
                    if !shared_strings.contains(s) {
                        shared_strings.push(s.clone());
                    }
                }
            }
        }

        let files = [
            (
                "[Content_Types].xml".to_string(),
                generate_content_types(self.sheets.len()),
            ),
            ("_rels/.rels".to_string(), generate_rels()),
            (
                "xl/_rels/workbook.xml.rels".to_string(),
                generate_workbook_rels(self.sheets.len()),
            ),
            ("xl/workbook.xml".to_string(), self.generate_workbook()),
            ("xl/styles.xml".to_string(), formats.generate_styles_xml()),
            (
                "xl/sharedStrings.xml".to_string(),
                generate_shared_strings(&shared_strings),
            ),
        ];
        for (path, contents) in files {
            zip.start_file(path, options).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }

        for (i, sheet) in self.sheets.iter().enumerate() {
            let path = format!("xl/worksheets/sheet{}.xml", i + 1);
            zip.start_file(path, options).unwrap();
            zip.write_all(generate_sheet_xml(sheet, &shared_strings, &formats).as_bytes())
                .unwrap();
        }

        let cursor = zip.finish().expect("Failed to finish ZIP");
        cursor.into_inner()
    }

    fn generate_workbook(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);
        if self.date1904 {
            xml.push_str(r#"<workbookPr date1904="1"/>"#);
        }
        xml.push_str("<sheets>");
        for (i, sheet) in self.sheets.iter().enumerate() {
            let state = sheet
                .state
                .as_deref()
                .map(|s| format!(r#" state="{s}""#))
                .unwrap_or_default();
            xml.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}"{} r:id="rId{}"/>"#,
                escape_xml(&sheet.name),
                i + 1,
                state,
                i + 1
            ));
        }
        xml.push_str("</sheets>");

        let mut names: Vec<(String, Option<u32>, String)> = self
            .sheets
            .iter()
            .enumerate()
            .filter_map(|(i, sheet)| {
                sheet.print_area.as_ref().map(|range| {
                    (
                        "_xlnm.Print_Area".to_string(),
                        Some(i as u32),
                        format!("'{}'!{}", sheet.name, range),
                    )
                })
            })
            .collect();
        names.extend(self.extra_names.iter().cloned());

        if !names.is_empty() {
            xml.push_str("<definedNames>");
            for (name, local, formula) in names {
                let local = local
                    .map(|id| format!(r#" localSheetId="{id}""#))
                    .unwrap_or_default();
                xml.push_str(&format!(
                    r#"<definedName name="{}"{}>{}</definedName>"#,
                    name,
                    local,
                    escape_xml(&formula)
                ));
            }
            xml.push_str("</definedNames>");
        }

        xml.push_str("</workbook>");
        xml
    }
}

// ============================================================================
// Number Formats
// ============================================================================

/// Collects custom number formats; each gets its own `cellXfs` entry.
#[derive(Debug, Default)]
struct FormatCollector {
    codes: Vec<String>,
}

impl FormatCollector {
    fn add(&mut self, code: &str) {
        if !self.codes.iter().any(|c| c == code) {
            self.codes.push(code.to_string());
        }
    }

    /// `cellXfs` index for a format; 0 is the General style.
    fn style_index(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|c| c == code).map(|i| i + 1)
    }

    fn generate_styles_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );
        if !self.codes.is_empty() {
            xml.push_str(&format!(r#"<numFmts count="{}">"#, self.codes.len()));
            for (i, code) in self.codes.iter().enumerate() {
                xml.push_str(&format!(
                    r#"<numFmt numFmtId="{}" formatCode="{}"/>"#,
                    164 + i,
                    escape_xml(code)
                ));
            }
            xml.push_str("</numFmts>");
        }
        xml.push_str(r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>"#);
        xml.push_str(r#"<fills count="1"><fill><patternFill patternType="none"/></fill></fills>"#);
        xml.push_str(r#"<borders count="1"><border/></borders>"#);
        xml.push_str(r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#);
        xml.push_str(&format!(r#"<cellXfs count="{}">"#, self.codes.len() + 1));
        xml.push_str(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#);
        for i in 0..self.codes.len() {
            xml.push_str(&format!(
                r#"<xf numFmtId="{}" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>"#,
                164 + i
            ));
        }
        xml.push_str("</cellXfs>");
        xml.push_str("</styleSheet>");
        xml
    }
}

// ============================================================================
// XML Generation
// ============================================================================

/// Generate [Content_Types].xml
fn generate_content_types(sheet_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#);
    for i in 1..=sheet_count {
        xml.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i
        ));
    }
    xml.push_str("</Types>");
    xml
}

/// Generate _rels/.rels
fn generate_rels() -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#);
    xml.push_str("</Relationships>");
    xml
}

/// Generate xl/_rels/workbook.xml.rels
fn generate_workbook_rels(sheet_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for i in 1..=sheet_count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i, i
        ));
    }
    let rid = sheet_count + 1;
    xml.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        rid
    ));
    xml.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
        rid + 1
    ));
    xml.push_str("</Relationships>");
    xml
}

/// Generate xl/sharedStrings.xml
fn generate_shared_strings(strings: &[String]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(&format!(
        r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
        strings.len(),
        strings.len()
    ));
    for s in strings {
        // Add xml:space="preserve" to preserve leading/trailing whitespace
        xml.push_str(&format!(
            r#"<si><t xml:space="preserve">{}</t></si>"#,
            escape_xml(s)
        ));
    }
    xml.push_str("</sst>");
    xml
}

fn generate_sheet_xml(
    sheet: &SheetBuilder,
    shared_strings: &[String],
    formats: &FormatCollector,
) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    xml.push_str("<sheetData>");

    if let Some(ref raw) = sheet.raw_sheet_data {
        xml.push_str(raw);
    } else {
        // Group cells by row
        let mut rows: BTreeMap<u32, Vec<&CellEntry>> = BTreeMap::new();
        for cell in &sheet.cells {
            let (_, row) = parse_cell_ref(&cell.cell_ref);
            rows.entry(row).or_default().push(cell);
        }

        for (row_num, cells) in rows {
            xml.push_str(&format!(r#"<row r="{}">"#, row_num));
            for cell in cells {
                xml.push_str(&cell_xml(cell, shared_strings, formats));
            }
            xml.push_str("</row>");
        }
    }

    xml.push_str("</sheetData>");

    if !sheet.merges.is_empty() {
        xml.push_str(&format!(r#"<mergeCells count="{}">"#, sheet.merges.len()));
        for merge in &sheet.merges {
            xml.push_str(&format!(r#"<mergeCell ref="{}"/>"#, merge));
        }
        xml.push_str("</mergeCells>");
    }

    xml.push_str("</worksheet>");
    xml
}

fn cell_xml(cell: &CellEntry, shared_strings: &[String], formats: &FormatCollector) -> String {
    let mut attrs = format!(r#"r="{}""#, cell.cell_ref);
    if let Some(idx) = cell
        .number_format
        .as_deref()
        .and_then(|code| formats.style_index(code))
    {
        attrs.push_str(&format!(r#" s="{}""#, idx));
    }

    match &cell.value {
        CellValue::String(s) => {
            let idx = shared_strings.iter().position(|x| x == s).unwrap_or(0);
            format!(r#"<c {} t="s"><v>{}</v></c>"#, attrs, idx)
        }
        CellValue::Number(n) => format!(r#"<c {}><v>{:?}</v></c>"#, attrs, n),
        CellValue::Integer(n) => format!(r#"<c {}><v>{}</v></c>"#, attrs, n),
        CellValue::Boolean(b) => {
            format!(r#"<c {} t="b"><v>{}</v></c>"#, attrs, if *b { "1" } else { "0" })
        }
        CellValue::Error(e) => format!(r#"<c {} t="e"><v>{}</v></c>"#, attrs, escape_xml(e)),
        CellValue::InlineString(s) => format!(
            r#"<c {} t="inlineStr"><is><t>{}</t></is></c>"#,
            attrs,
            escape_xml(s)
        ),
        CellValue::FormulaString(s) => format!(
            r#"<c {} t="str"><f>"{}"</f><v>{}</v></c>"#,
            attrs,
            escape_xml(s),
            escape_xml(s)
        ),
        CellValue::Empty => format!(r#"<c {}/>"#, attrs),
    }
}

/// Parse a cell reference like "A1" into (col, row) as 1-indexed.
fn parse_cell_ref(cell_ref: &str) -> (u32, u32) {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut in_letters = true;

    for c in cell_ref.chars() {
        if in_letters && c.is_ascii_alphabetic() {
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        } else {
            in_letters = false;
            if c.is_ascii_digit() {
                row = row * 10 + (c as u32 - '0' as u32);
            }
        }
    }

    (col, row)
}

/// Convert a 1-indexed column number to letters.
pub fn col_num_to_letter(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        col -= 1;
        letters.push((b'A' + (col % 26) as u8) as char);
        col /= 26;
    }
    letters.iter().rev().collect()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Create a minimal valid XLSX with a single empty sheet.
#[must_use]
pub fn minimal_xlsx() -> Vec<u8> {
    XlsxBuilder::new().sheet(SheetBuilder::new("Sheet1")).build()
}

/// A sheet holding a `rows` x `cols` table: a text header row, then integers.
#[must_use]
pub fn table_sheet(name: &str, rows: u32, cols: u32) -> SheetBuilder {
    let mut sheet = SheetBuilder::new(name);
    for col in 1..=cols {
        let letter = col_num_to_letter(col);
        sheet = sheet.cell(&format!("{letter}1"), format!("Col {letter}"));
        for row in 2..=rows {
            sheet = sheet.cell(&format!("{letter}{row}"), row * 100 + col);
        }
    }
    sheet
}
