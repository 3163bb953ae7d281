//! Extractor for the `problem_categories` legacy family.

use serde_json::Value;

use guideforge_shared::Difficulty;

use super::{
    RawContextGroup, RawItem, RawItemKind, ShapeExtractor, entries, str_field,
    value_array,
};
use crate::text::title_from_key;

/// Problem catalogs: each category carries a `problems` array. A problem
/// becomes one content item whose text is the problem description and whose
/// meaning composes the impact and mitigation texts.
pub struct ProblemsShape;

impl ShapeExtractor for ProblemsShape {
    fn detect(&self, doc: &Value) -> bool {
        doc.get("problem_categories").is_some()
    }

    fn extract(&self, doc: &Value) -> Vec<RawContextGroup> {
        let Some(grouping) = doc.get("problem_categories") else {
            return Vec::new();
        };

        entries(grouping)
            .into_iter()
            .map(|(key, group)| RawContextGroup {
                id: key.clone(),
                title: str_field(group, &["title", "name"])
                    .unwrap_or_else(|| title_from_key(&key)),
                description: str_field(group, &["description"]).unwrap_or_default(),
                difficulty: str_field(group, &["difficulty"])
                    .as_deref()
                    .and_then(Difficulty::parse_label),
                category_override: str_field(group, &["category"]),
                items: value_array(group, "problems")
                    .into_iter()
                    .map(|v| RawItem::new(RawItemKind::Problem, v))
                    .collect(),
                examples: value_array(group, "examples"),
                exercises: value_array(group, "exercises"),
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "problem_categories"
    }
}
