//! Shared XML attribute helpers for the XLSX reader.
//!
//! All functions handle UTF-8 conversion safely and return `None` rather
//! than failing on malformed attributes.

use quick_xml::events::BytesStart;

/// Extract a string attribute value by key.
///
/// Returns `None` if the attribute is missing or not valid UTF-8. Entity
/// references in the value are decoded.
pub fn attr_string(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Extract a string attribute by local name (ignoring namespace prefix).
pub fn attr_string_local(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Extract a `u32` attribute value by key.
pub fn attr_u32(e: &BytesStart, key: &[u8]) -> Option<u32> {
    attr_string(e, key).and_then(|s| s.trim().parse().ok())
}

/// Extract a boolean attribute value by key.
///
/// Recognizes `"1"` and `"true"` as true; anything else present is false.
pub fn attr_bool(e: &BytesStart, key: &[u8]) -> Option<bool> {
    attr_string(e, key).map(|s| matches!(s.as_str(), "1" | "true"))
}

/// Get the local element name as an owned string.
///
/// Returns empty string if not valid UTF-8.
#[inline]
pub fn local_name_string(e: &BytesStart) -> String {
    let bytes = e.local_name();
    std::str::from_utf8(bytes.as_ref())
        .unwrap_or("")
        .to_string()
}
