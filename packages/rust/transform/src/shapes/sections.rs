//! Extractor for the array-shaped `sections` legacy family.

use serde_json::Value;

use super::{RawContextGroup, ShapeExtractor};
use crate::shapes::keyed::group_from_object;

/// Ordered `sections` array; the only legacy family where group order is
/// explicit in the document. Group ids are positional indexes.
pub struct SectionsShape;

impl ShapeExtractor for SectionsShape {
    fn detect(&self, doc: &Value) -> bool {
        doc.get("sections").is_some()
    }

    fn extract(&self, doc: &Value) -> Vec<RawContextGroup> {
        let Some(sections) = doc.get("sections").and_then(Value::as_array) else {
            return Vec::new();
        };

        sections
            .iter()
            .enumerate()
            .map(|(index, section)| group_from_object(&index.to_string(), section))
            .collect()
    }

    fn name(&self) -> &'static str {
        "sections"
    }
}
