//! Extractor for the `cause_effect_categories` legacy family.

use serde_json::Value;

use guideforge_shared::Difficulty;

use super::{
    RawContextGroup, RawItem, RawItemKind, ShapeExtractor, entries, str_field,
    value_array,
};
use crate::text::title_from_key;

/// Cause/effect verb catalogs: each category carries a `verbs` array of
/// cause/effect pairs. A pair becomes one content item whose text is the verb
/// and whose meaning carries the paired description.
pub struct CauseEffectShape;

impl ShapeExtractor for CauseEffectShape {
    fn detect(&self, doc: &Value) -> bool {
        doc.get("cause_effect_categories").is_some()
    }

    fn extract(&self, doc: &Value) -> Vec<RawContextGroup> {
        let Some(grouping) = doc.get("cause_effect_categories") else {
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
                items: value_array(group, "verbs")
                    .into_iter()
                    .map(|v| RawItem::new(RawItemKind::VerbPair, v))
                    .collect(),
                examples: value_array(group, "examples"),
                exercises: value_array(group, "exercises"),
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "cause_effect_categories"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_verb_pairs() {
        let doc = json!({
            "title": "Cause and Effect in Software",
            "cause_effect_categories": {
                "performance": {
                    "title": "Performance",
                    "verbs": [
                        { "verb": "degrade", "effect": "response times climb under load" },
                        { "verb": "throttle", "effect": "request rates drop to a safe level" }
                    ]
                }
            }
        });

        let groups = CauseEffectShape.extract(&doc);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "performance");
        assert_eq!(groups[0].items.len(), 2);
        assert!(groups[0].items.iter().all(|i| i.kind == RawItemKind::VerbPair));
    }

    #[test]
    fn category_without_verbs_is_empty() {
        let doc = json!({
            "cause_effect_categories": { "stub": { "title": "Stub" } }
        });

        let groups = CauseEffectShape.extract(&doc);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].items.is_empty());
    }
}
