//! Shared string table (`xl/sharedStrings.xml`).

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

use crate::error::Result;

/// Parse the shared string table.
///
/// Rich-text runs of one `<si>` are concatenated; phonetic hints (`rPh`)
/// are not part of the cell text and are skipped.
pub(super) fn parse_shared_strings<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut strings = Vec::new();
    let mut buf = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    let mut in_phonetic = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Event::Empty(ref e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(ref e) if in_t => current.push_str(&e.unescape()?),
            Event::End(ref e) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(std::mem::take(&mut current));
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}
