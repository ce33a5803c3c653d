//! Number format codes: the built-in table, classification, and conversion
//! of Excel serial numbers to calendar date-times.
//!
//! Format codes are carried through untouched; the reader only uses
//! [`is_date_format`] to decide whether a numeric cell holds a date.

use crate::types::ExcelDateTime;

/// Built-in number format IDs (0-49 are predefined by Excel)
/// See: ECMA-376 Part 1, Section 18.8.30
pub const fn get_builtin_format(id: u32) -> Option<&'static str> {
    match id {
        0 => Some("General"),
        1 => Some("0"),
        2 => Some("0.00"),
        3 => Some("#,##0"),
        4 => Some("#,##0.00"),
        5 => Some("$#,##0_);($#,##0)"),
        6 => Some("$#,##0_);[Red]($#,##0)"),
        7 => Some("$#,##0.00_);($#,##0.00)"),
        8 => Some("$#,##0.00_);[Red]($#,##0.00)"),
        9 => Some("0%"),
        10 => Some("0.00%"),
        11 => Some("0.00E+00"),
        12 => Some("# ?/?"),
        13 => Some("# ??/??"),
        14 => Some("mm-dd-yy"),
        15 => Some("d-mmm-yy"),
        16 => Some("d-mmm"),
        17 => Some("mmm-yy"),
        18 => Some("h:mm AM/PM"),
        19 => Some("h:mm:ss AM/PM"),
        20 => Some("h:mm"),
        21 => Some("h:mm:ss"),
        22 => Some("m/d/yy h:mm"),
        37 => Some("#,##0 ;(#,##0)"),
        38 => Some("#,##0 ;[Red](#,##0)"),
        39 => Some("#,##0.00;(#,##0.00)"),
        40 => Some("#,##0.00;[Red](#,##0.00)"),
        41 => Some("_(* #,##0_);_(* (#,##0);_(* \"-\"_);_(@_)"),
        42 => Some("_($* #,##0_);_($* (#,##0);_($* \"-\"_);_(@_)"),
        43 => Some("_(* #,##0.00_);_(* (#,##0.00);_(* \"-\"??_);_(@_)"),
        44 => Some("_($* #,##0.00_);_($* (#,##0.00);_($* \"-\"??_);_(@_)"),
        45 => Some("mm:ss"),
        46 => Some("[h]:mm:ss"),
        47 => Some("mmss.0"),
        48 => Some("##0.0E+0"),
        49 => Some("@"),
        _ => None,
    }
}

/// Strip quoted literals, bracketed sections and backslash escapes, lowercased.
fn format_tokens(format_code: &str) -> String {
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut escaped = false;
    let mut cleaned = String::with_capacity(format_code.len());

    for c in format_code.chars().flat_map(char::to_lowercase) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '[' if !in_quotes => in_brackets = true,
            ']' if !in_quotes => in_brackets = false,
            _ if !in_quotes && !in_brackets => cleaned.push(c),
            _ => {}
        }
    }
    cleaned
}

/// Check if a format code is a date/time format
pub fn is_date_format(format_code: &str) -> bool {
    if format_code.eq_ignore_ascii_case("general") {
        return false;
    }
    let cleaned = format_tokens(format_code);

    cleaned.contains('y')
        || (cleaned.contains('m') && !cleaned.contains('#'))
        || cleaned.contains('d')
        || cleaned.contains('h')
        || (cleaned.contains('s') && cleaned.contains(':'))
}

/// Largest serial Excel accepts (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.999_999;
const SECONDS_PER_DAY: i64 = 86_400;
/// Days from 1970-01-01 back to the 1900 system's day zero (1899-12-31).
const EPOCH_1900_OFFSET: i64 = 25_568;
/// Days from 1970-01-01 back to 1904-01-01.
const EPOCH_1904_OFFSET: i64 = 24_107;

/// Convert an Excel serial number to a calendar date-time.
///
/// Returns `None` for negative, non-finite or out-of-range serials. In the
/// 1900 system serial 60 is Excel's phantom 29 February 1900; it and every
/// later serial are shifted back one day.
#[allow(clippy::cast_possible_truncation)]
pub fn serial_to_datetime(serial: f64, date1904: bool) -> Option<ExcelDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }
    // Range-checked above, so the product fits an i64.
    let total_seconds = (serial * 86_400.0).round() as i64;
    let serial_days = total_seconds.div_euclid(SECONDS_PER_DAY);
    let secs = total_seconds.rem_euclid(SECONDS_PER_DAY);

    let unix_days = if date1904 {
        serial_days - EPOCH_1904_OFFSET
    } else if serial_days < 60 {
        serial_days - EPOCH_1900_OFFSET
    } else {
        serial_days - EPOCH_1900_OFFSET - 1
    };

    let (year, month, day) = civil_from_days(unix_days)?;
    Some(ExcelDateTime {
        year,
        month,
        day,
        hour: u32::try_from(secs / 3600).ok()?,
        minute: u32::try_from((secs % 3600) / 60).ok()?,
        second: u32::try_from(secs % 60).ok()?,
    })
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day).
fn civil_from_days(days: i64) -> Option<(i32, u32, u32)> {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    Some((
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    ))
}
