//! Extractors for the four mapping-shaped legacy families.
//!
//! `professional_contexts`, `categories`, `phases`, and `specialized_areas`
//! all share one structure: a map from group key to a group object whose
//! items live under one of several alternative fields. They differ only in
//! the distinguishing top-level key, so they share a single keyed-group
//! walker.

use serde_json::Value;

use guideforge_shared::Difficulty;

use super::{
    RawContextGroup, RawItem, RawItemKind, ShapeExtractor, entries, str_field,
    value_array,
};
use crate::text::title_from_key;

/// Alternative item fields on a legacy group, probed in this fixed order.
/// At most one is populated per group; the first non-empty field wins, so a
/// group can never contribute duplicated items from two fields.
const ITEM_FIELDS: &[(&str, RawItemKind)] = &[
    ("phrases", RawItemKind::Phrase),
    ("comparative_adjectives", RawItemKind::ComparativeAdjective),
    ("superlative_adjectives", RawItemKind::SuperlativeAdjective),
    ("content", RawItemKind::Content),
    ("sentences", RawItemKind::Sentence),
];

/// Probe the alternative item fields and take the first non-empty one.
pub(crate) fn probe_items(group: &Value) -> Vec<RawItem> {
    for (field, kind) in ITEM_FIELDS {
        if let Some(arr) = group.get(*field).and_then(Value::as_array) {
            if !arr.is_empty() {
                return arr
                    .iter()
                    .map(|v| RawItem::new(*kind, v.clone()))
                    .collect();
            }
        }
    }
    Vec::new()
}

/// Build a [`RawContextGroup`] from a keyed group object.
pub(crate) fn group_from_object(id: &str, group: &Value) -> RawContextGroup {
    RawContextGroup {
        id: id.to_string(),
        title: str_field(group, &["title", "name"]).unwrap_or_else(|| title_from_key(id)),
        description: str_field(group, &["description"]).unwrap_or_default(),
        difficulty: str_field(group, &["difficulty"])
            .as_deref()
            .and_then(Difficulty::parse_label),
        category_override: str_field(group, &["category"]),
        items: probe_items(group),
        examples: value_array(group, "examples"),
        exercises: value_array(group, "exercises"),
    }
}

/// Walk a keyed grouping: map entries become groups, the map key becomes the
/// group id.
fn keyed_groups(doc: &Value, key: &str) -> Vec<RawContextGroup> {
    let Some(grouping) = doc.get(key) else {
        return Vec::new();
    };

    entries(grouping)
        .into_iter()
        .map(|(group_key, group)| group_from_object(&group_key, group))
        .collect()
}

macro_rules! keyed_shape {
    ($name:ident, $key:literal, $doc:literal) => {
        #[doc = $doc]
        pub struct $name;

        impl ShapeExtractor for $name {
            fn detect(&self, doc: &Value) -> bool {
                doc.get($key).is_some()
            }

            fn extract(&self, doc: &Value) -> Vec<RawContextGroup> {
                keyed_groups(doc, $key)
            }

            fn name(&self) -> &'static str {
                $key
            }
        }
    };
}

keyed_shape!(
    ProfessionalContextsShape,
    "professional_contexts",
    "Workplace-situation groupings (meetings, standups, code review)."
);
keyed_shape!(
    CategoriesShape,
    "categories",
    "Generic keyed category groupings, the most common legacy family."
);
keyed_shape!(
    PhasesShape,
    "phases",
    "Sequential phase groupings (interview stages, onboarding steps)."
);
keyed_shape!(
    SpecializedAreasShape,
    "specialized_areas",
    "Domain-specific technical area groupings."
);
