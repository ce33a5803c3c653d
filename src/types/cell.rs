use serde::{Serialize, Serializer};
use std::fmt;

use crate::cell_ref::coordinate;

/// A 1-based grid coordinate. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellPos {
    pub row: u32,
    pub col: u32,
}

impl CellPos {
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1-style coordinate, e.g. `C7`.
    #[must_use]
    pub fn coordinate(&self) -> String {
        coordinate(self.row, self.col)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordinate())
    }
}

impl Serialize for CellPos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A date/time decoded from an Excel serial number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExcelDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl fmt::Display for ExcelDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl Serialize for ExcelDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A populated cell value. Empty cells are never represented.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(ExcelDateTime),
}

/// Semantic type tag attached to materialized table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Text,
    Number,
    Boolean,
    Date,
    Empty,
}

impl CellKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Empty => "empty",
        }
    }
}

impl CellValue {
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        match self {
            Self::Text(_) => CellKind::Text,
            Self::Integer(_) | Self::Float(_) => CellKind::Number,
            Self::Boolean(_) => CellKind::Boolean,
            Self::DateTime(_) => CellKind::Date,
        }
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Numeric view of the value, for integers and floats only.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Natural string form: text verbatim, integers as digits, whole floats with
/// one decimal (`3.0`), booleans as `True`/`False`.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{v:.1}")
            }
            Self::Float(v) => write!(f, "{v}"),
            Self::Boolean(true) => f.write_str("True"),
            Self::Boolean(false) => f.write_str("False"),
            Self::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// A populated cell: its value and the number format that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    /// Number format code from the cell's style (e.g. `0.0%`), if any.
    pub number_format: Option<String>,
}

impl Cell {
    #[must_use]
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            number_format: None,
        }
    }

    #[must_use]
    pub fn with_format(value: impl Into<CellValue>, format: &str) -> Self {
        Self {
            value: value.into(),
            number_format: Some(format.to_string()),
        }
    }
}

impl From<CellValue> for Cell {
    fn from(value: CellValue) -> Self {
        Self {
            value,
            number_format: None,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_pos_ordering_is_row_major() {
        let mut cells = vec![
            CellPos::new(2, 1),
            CellPos::new(1, 3),
            CellPos::new(1, 1),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![CellPos::new(1, 1), CellPos::new(1, 3), CellPos::new(2, 1)]
        );
        assert_eq!(CellPos::new(10, 28).to_string(), "AB10");
    }

    #[test]
    fn test_natural_string_form() {
        assert_eq!(CellValue::from("abc").to_string(), "abc");
        assert_eq!(CellValue::Integer(42).to_string(), "42");
        assert_eq!(CellValue::Float(3.0).to_string(), "3.0");
        assert_eq!(CellValue::Float(0.125).to_string(), "0.125");
        assert_eq!(CellValue::Boolean(true).to_string(), "True");
        assert_eq!(CellValue::Boolean(false).to_string(), "False");
        let dt = ExcelDateTime {
            year: 2024,
            month: 1,
            day: 15,
            hour: 9,
            minute: 5,
            second: 0,
        };
        assert_eq!(CellValue::DateTime(dt).to_string(), "2024-01-15 09:05:00");
    }

    #[test]
    fn test_kind() {
        assert_eq!(CellValue::from("x").kind(), CellKind::Text);
        assert_eq!(CellValue::Integer(1).kind(), CellKind::Number);
        assert_eq!(CellValue::Float(1.5).kind(), CellKind::Number);
        assert_eq!(CellValue::Boolean(false).kind(), CellKind::Boolean);
        assert_eq!(CellKind::Date.as_str(), "date");
    }

    #[test]
    fn test_value_serializes_raw() {
        let json = serde_json::to_string(&vec![
            CellValue::from("a"),
            CellValue::Integer(2),
            CellValue::Float(2.5),
            CellValue::Boolean(true),
        ])
        .unwrap();
        assert_eq!(json, r#"["a",2,2.5,true]"#);
    }
}
