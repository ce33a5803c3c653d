use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::{CellValue, Rect};

/// A merged cell range and the value held by its top-left anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRegion {
    pub bounds: Rect,
    pub value: Option<CellValue>,
}

impl MergedRegion {
    #[must_use]
    pub const fn new(bounds: Rect, value: Option<CellValue>) -> Self {
        Self { bounds, value }
    }

    /// Anchor value in natural string form, empty when the anchor is blank.
    #[must_use]
    pub fn text(&self) -> String {
        self.value.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}

impl Serialize for MergedRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("MergedRegion", 2)?;
        s.serialize_field("range", &self.bounds.to_a1())?;
        s.serialize_field("value", &self.value)?;
        s.end()
    }
}
