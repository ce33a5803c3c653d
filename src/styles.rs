//! Number format lookup from `xl/styles.xml`.
//!
//! Cells point at a `cellXfs/xf` entry through their `s` attribute; that
//! entry's `numFmtId` names either a built-in format or a custom `numFmt`.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;

use crate::error::Result;
use crate::numfmt::{get_builtin_format, is_date_format};
use crate::xml_helpers::{attr_string, attr_u32};

/// Resolved number format of one cell style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellFormat {
    /// `None` for the General format.
    pub code: Option<String>,
    pub is_date: bool,
}

/// Number formats indexed by cell style.
#[derive(Debug, Clone, Default)]
pub struct NumberFormats {
    formats: Vec<CellFormat>,
}

impl NumberFormats {
    /// Format for the style index found in a cell's `s` attribute.
    pub fn for_style(&self, style_idx: Option<u32>) -> Option<&CellFormat> {
        let idx = usize::try_from(style_idx?).ok()?;
        self.formats.get(idx)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

fn resolve(num_fmt_id: u32, custom: &HashMap<u32, String>) -> CellFormat {
    let code = custom
        .get(&num_fmt_id)
        .cloned()
        .or_else(|| get_builtin_format(num_fmt_id).map(ToString::to_string))
        .filter(|c| !c.eq_ignore_ascii_case("general"));
    CellFormat {
        is_date: code.as_deref().is_some_and(is_date_format),
        code,
    }
}

/// Parse the `numFmts` and `cellXfs` sections of a stylesheet.
pub fn parse_number_formats<R: BufRead>(reader: R) -> Result<NumberFormats> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut custom: HashMap<u32, String> = HashMap::new();
    let mut xf_ids: Vec<u32> = Vec::new();
    let mut in_num_fmts = false;
    let mut in_cell_xfs = false;
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"numFmts" => in_num_fmts = true,
                b"cellXfs" => in_cell_xfs = true,
                b"numFmt" if in_num_fmts => {
                    if let (Some(id), Some(code)) =
                        (attr_u32(e, b"numFmtId"), attr_string(e, b"formatCode"))
                    {
                        custom.insert(id, code);
                    }
                }
                b"xf" if in_cell_xfs => {
                    xf_ids.push(attr_u32(e, b"numFmtId").unwrap_or(0));
                }
                _ => {}
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"numFmts" => in_num_fmts = false,
                b"cellXfs" => in_cell_xfs = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(NumberFormats {
        formats: xf_ids.into_iter().map(|id| resolve(id, &custom)).collect(),
    })
}
