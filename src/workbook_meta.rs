//! Workbook metadata parsing module
//! This module handles parsing workbook.xml for sheets, date system and defined names,
//! and the workbook relationships that locate each part of the package.

use crate::cell_ref::clean_range;
use crate::error::Result;
use crate::types::{DefinedName, Sheet, SheetState};
use crate::xml_helpers::{attr_bool, attr_string, attr_string_local, attr_u32};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;

const PRINT_AREA: &str = "_xlnm.Print_Area";

/// Workbook relationships parsed from xl/_rels/workbook.xml.rels
///
/// Paths are resolved relative to the xl/ directory and stored as full paths.
#[derive(Default, Debug)]
pub struct WorkbookRelationships {
    /// Map of rId -> full path for worksheet relationships
    /// e.g., "rId1" -> "xl/worksheets/sheet1.xml"
    pub worksheets: HashMap<String, String>,
    pub shared_strings: Option<String>,
    pub styles: Option<String>,
}

/// Sheet metadata from workbook.xml
#[derive(Debug, Clone)]
pub struct SheetInfo {
    pub name: String,
    pub path: String,
    pub state: SheetState,
}

/// Workbook metadata parsed from workbook.xml
#[derive(Debug, Default)]
pub struct WorkbookMeta {
    pub sheets: Vec<SheetInfo>,
    pub date1904: bool,
    pub defined_names: Vec<DefinedName>,
}

/// Parse workbook relationships (xl/_rels/workbook.xml.rels)
pub fn parse_workbook_relationships<R: BufRead>(reader: R) -> Result<WorkbookRelationships> {
    let mut rels = WorkbookRelationships::default();
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let id = attr_string(e, b"Id").unwrap_or_default();
                let target = attr_string(e, b"Target").unwrap_or_default();
                let rel_type = attr_string(e, b"Type").unwrap_or_default();
                let full_path = resolve_relationship_path(&target);

                if rel_type.ends_with("/worksheet") && !id.is_empty() && !target.is_empty() {
                    rels.worksheets.insert(id, full_path);
                } else if rel_type.ends_with("/sharedStrings") {
                    rels.shared_strings = Some(full_path);
                } else if rel_type.ends_with("/styles") {
                    rels.styles = Some(full_path);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Resolve a relationship target path to a full path within the archive
pub fn resolve_relationship_path(target: &str) -> String {
    if let Some(stripped) = target.strip_prefix('/') {
        stripped.to_string()
    } else if target.starts_with("../") {
        let mut path = target;
        while let Some(stripped) = path.strip_prefix("../") {
            path = stripped;
        }
        path.to_string()
    } else {
        format!("xl/{target}")
    }
}

/// Parse workbook.xml for sheet info, date system, and defined names
///
/// Parses:
/// - `<sheets><sheet name="..." r:id="rId1" state="hidden"/></sheets>`
/// - `<workbookPr date1904="1"/>`
/// - `<definedNames><definedName name="_xlnm.Print_Area" localSheetId="0">Sheet1!$A$1:$D$10</definedName></definedNames>`
pub fn parse_workbook_xml<R: BufRead>(
    reader: R,
    relationships: &HashMap<String, String>,
) -> Result<WorkbookMeta> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut meta = WorkbookMeta::default();
    let mut buf = Vec::new();
    let mut in_defined_names = false;
    let mut current_name: Option<DefinedNameBuilder> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"definedNames" => in_defined_names = true,
                b"definedName" if in_defined_names => {
                    current_name = Some(DefinedNameBuilder::from_element(e));
                }
                b"sheet" => {
                    if let Some(info) = parse_sheet_element(e, relationships, meta.sheets.len()) {
                        meta.sheets.push(info);
                    }
                }
                b"workbookPr" => meta.date1904 = attr_bool(e, b"date1904").unwrap_or(false),
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"sheet" => {
                    if let Some(info) = parse_sheet_element(e, relationships, meta.sheets.len()) {
                        meta.sheets.push(info);
                    }
                }
                b"workbookPr" => meta.date1904 = attr_bool(e, b"date1904").unwrap_or(false),
                b"definedName" if in_defined_names => {
                    if let Some(dn) = DefinedNameBuilder::from_element(e).build() {
                        meta.defined_names.push(dn);
                    }
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if let Some(ref mut builder) = current_name {
                    builder.value.push_str(&e.unescape()?);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"definedNames" => in_defined_names = false,
                b"definedName" => {
                    if let Some(dn) = current_name.take().and_then(DefinedNameBuilder::build) {
                        meta.defined_names.push(dn);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(meta)
}

struct DefinedNameBuilder {
    name: String,
    local_sheet_id: Option<u32>,
    hidden: bool,
    value: String,
}

impl DefinedNameBuilder {
    fn from_element(e: &BytesStart<'_>) -> Self {
        Self {
            name: attr_string(e, b"name").unwrap_or_default(),
            local_sheet_id: attr_u32(e, b"localSheetId"),
            hidden: attr_bool(e, b"hidden").unwrap_or(false),
            value: String::new(),
        }
    }

    fn build(self) -> Option<DefinedName> {
        if self.name.is_empty() {
            return None;
        }
        Some(DefinedName {
            name: self.name,
            value: self.value,
            local_sheet_id: self.local_sheet_id,
            hidden: self.hidden,
        })
    }
}

fn parse_sheet_element(
    e: &BytesStart<'_>,
    relationships: &HashMap<String, String>,
    sheet_index: usize,
) -> Option<SheetInfo> {
    let name = attr_string(e, b"name").filter(|n| !n.is_empty())?;
    let state = match attr_string(e, b"state").as_deref() {
        Some("hidden") => SheetState::Hidden,
        Some("veryHidden") => SheetState::VeryHidden,
        _ => SheetState::Visible,
    };

    // Fall back to the conventional part name when the rId is unknown.
    let path = attr_string_local(e, b"id")
        .and_then(|r_id| relationships.get(&r_id).cloned())
        .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", sheet_index + 1));

    Some(SheetInfo { name, path, state })
}

/// Attach `_xlnm.Print_Area` names to the sheets they are scoped to.
///
/// The stored value is the first area of the formula with the sheet
/// qualifier and `$` anchors removed.
pub fn apply_defined_names_to_sheets(sheets: &mut [Sheet], defined_names: &[DefinedName]) {
    for dn in defined_names.iter().filter(|dn| dn.name == PRINT_AREA) {
        let Some(sheet) = dn
            .local_sheet_id
            .and_then(|id| usize::try_from(id).ok())
            .and_then(|idx| sheets.get_mut(idx))
        else {
            continue;
        };
        match clean_range(&dn.value) {
            Some(range) => sheet.print_area = Some(range),
            None => log::warn!("{}: ignoring print area {:?}", sheet.name, dn.value),
        }
    }
}
