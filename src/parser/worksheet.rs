//! Worksheet parsing - turns one sheet part into populated cells and merge references.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;
use std::io::BufRead;

use crate::cell_ref::parse_cell_ref_bytes;
use crate::error::Result;
use crate::numfmt::serial_to_datetime;
use crate::styles::NumberFormats;
use crate::types::{Cell, CellPos, CellValue};
use crate::xml_helpers::attr_string;

/// Cell type tag from the `t` attribute of a `<c>` element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum CellTypeTag {
    Shared,
    Inline,
    Str,
    Bool,
    Error,
    IsoDate,
    Number,
}

pub(super) fn parse_cell_type_tag(value: &[u8]) -> CellTypeTag {
    match value {
        b"s" => CellTypeTag::Shared,
        b"b" => CellTypeTag::Bool,
        b"e" => CellTypeTag::Error,
        b"str" => CellTypeTag::Str,
        b"inlineStr" => CellTypeTag::Inline,
        b"d" => CellTypeTag::IsoDate,
        _ => CellTypeTag::Number,
    }
}

pub(super) fn parse_u32_bytes(value: &[u8]) -> Option<u32> {
    let mut num: u32 = 0;
    let mut seen = false;
    for &b in value {
        if !b.is_ascii_digit() {
            return None;
        }
        seen = true;
        num = num.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    seen.then_some(num)
}

/// Workbook-wide lookups every sheet needs.
pub(super) struct SheetContext<'a> {
    pub shared_strings: &'a [String],
    pub formats: &'a NumberFormats,
    pub date1904: bool,
}

/// Contents of one worksheet part.
#[derive(Debug, Default)]
pub(super) struct SheetData {
    pub cells: BTreeMap<CellPos, Cell>,
    pub merges: Vec<String>,
}

/// Attributes of a `<c>` element.
struct CellHead {
    pos: Option<CellPos>,
    tag: CellTypeTag,
    style_idx: Option<u32>,
}

impl CellHead {
    fn from_element(e: &BytesStart<'_>) -> Self {
        let mut head = Self {
            pos: None,
            tag: CellTypeTag::Number,
            style_idx: None,
        };
        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => head.pos = parse_cell_ref_bytes(&attr.value),
                b"t" => head.tag = parse_cell_type_tag(&attr.value),
                b"s" => head.style_idx = parse_u32_bytes(&attr.value),
                _ => {}
            }
        }
        head
    }
}

pub(super) fn parse_sheet<R: BufRead>(
    reader: R,
    sheet_name: &str,
    ctx: &SheetContext<'_>,
) -> Result<SheetData> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut data = SheetData::default();
    let mut buf = Vec::new();
    let mut current_row: u32 = 0;
    let mut last_col: u32 = 0;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"row" => {
                current_row = attr_string(e, b"r")
                    .and_then(|r| r.parse().ok())
                    .unwrap_or(current_row.saturating_add(1));
                last_col = 0;
            }
            Event::Start(ref e) if e.local_name().as_ref() == b"c" => {
                let head = CellHead::from_element(e);
                let raw = read_cell_text(&mut xml)?;
                let pos = place(head.pos, current_row, last_col);
                last_col = pos.col;
                if let Some(cell) = raw.and_then(|raw| convert(&raw, &head, pos, sheet_name, ctx))
                {
                    data.cells.insert(pos, cell);
                }
            }
            Event::Empty(ref e) => match e.local_name().as_ref() {
                // Self-closing cells carry no value, but still advance the column.
                b"c" => last_col = place(CellHead::from_element(e).pos, current_row, last_col).col,
                b"mergeCell" => {
                    if let Some(range) = attr_string(e, b"ref") {
                        data.merges.push(range);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    log::trace!(
        "{sheet_name}: {} cells, {} merges",
        data.cells.len(),
        data.merges.len()
    );
    Ok(data)
}

/// Cells without an `r` attribute follow the previous cell of the row.
fn place(pos: Option<CellPos>, current_row: u32, last_col: u32) -> CellPos {
    pos.unwrap_or_else(|| CellPos::new(current_row.max(1), last_col.saturating_add(1)))
}

/// Read the children of a `<c>` up to its end tag, returning the `<v>`
/// text or the concatenated `<t>` runs of an inline string.
fn read_cell_text<R: BufRead>(xml: &mut Reader<R>) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let mut value: Option<String> = None;
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"v" | b"t" if !in_phonetic => {
                    in_text = true;
                    value.get_or_insert_with(String::new);
                }
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Text(ref t) if in_text => {
                value.get_or_insert_with(String::new).push_str(&t.unescape()?);
            }
            Event::CData(ref t) if in_text => {
                value
                    .get_or_insert_with(String::new)
                    .push_str(&String::from_utf8_lossy(t));
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"v" | b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                b"c" => break,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(value)
}

fn convert(
    raw: &str,
    head: &CellHead,
    pos: CellPos,
    sheet_name: &str,
    ctx: &SheetContext<'_>,
) -> Option<Cell> {
    let format = ctx.formats.for_style(head.style_idx);
    let value = match head.tag {
        CellTypeTag::Shared => {
            let idx = raw.trim().parse::<usize>().ok();
            match idx.and_then(|i| ctx.shared_strings.get(i)) {
                Some(s) => CellValue::Text(s.clone()),
                None => {
                    log::warn!("{sheet_name}!{pos}: bad shared string index {raw:?}");
                    return None;
                }
            }
        }
        CellTypeTag::Inline | CellTypeTag::Str | CellTypeTag::Error | CellTypeTag::IsoDate => {
            CellValue::Text(raw.to_string())
        }
        CellTypeTag::Bool => CellValue::Boolean(matches!(raw.trim(), "1" | "true")),
        CellTypeTag::Number => {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            let is_date = format.is_some_and(|f| f.is_date);
            parse_number(raw, is_date, ctx.date1904).unwrap_or_else(|| {
                log::warn!("{sheet_name}!{pos}: non-numeric value {raw:?} kept as text");
                CellValue::Text(raw.to_string())
            })
        }
    };

    Some(Cell {
        value,
        number_format: format.and_then(|f| f.code.clone()),
    })
}

/// Numeric cell text to a value. Whole numbers written without a decimal
/// point or exponent stay integers.
fn parse_number(raw: &str, is_date: bool, date1904: bool) -> Option<CellValue> {
    let number: f64 = raw.parse().ok()?;
    if is_date {
        if let Some(dt) = serial_to_datetime(number, date1904) {
            return Some(CellValue::DateTime(dt));
        }
    }
    if !raw.contains(['.', 'e', 'E']) {
        if let Ok(i) = raw.parse::<i64>() {
            return Some(CellValue::Integer(i));
        }
    }
    Some(CellValue::Float(number))
}
