//! Extraction of the optional `basic_concepts` block.
//!
//! Some legacy documents expose a block of top-level definitions alongside
//! (or instead of) their grouped content. The block is either a map from
//! concept key to concept object or an ordered array; both forms are
//! tolerated, and a bare string value is treated as the definition itself.

use serde_json::Value;

use guideforge_shared::{Concept, GuideId};

use crate::normalize::{ItemOrigin, normalize_item};
use crate::shapes::{RawItem, RawItemKind, entries, str_field, value_array};
use crate::text::{slugify, title_from_key};

/// Extract concepts from a legacy document. Absent or unusable blocks yield
/// an empty list, never an error.
pub fn extract_concepts(guide_id: &GuideId, doc: &Value) -> Vec<Concept> {
    let Some(block) = doc.get("basic_concepts") else {
        return Vec::new();
    };

    entries(block)
        .into_iter()
        .map(|(key, value)| concept_from_entry(guide_id, &key, value))
        .collect()
}

fn concept_from_entry(guide_id: &GuideId, key: &str, value: &Value) -> Concept {
    let id = slugify(key);
    // Namespaced so concept example ids can never collide with context ids.
    let item_group = format!("concept-{id}");

    if let Some(definition) = value.as_str() {
        return Concept {
            id,
            title: title_from_key(key),
            definition: definition.trim().to_string(),
            examples: Vec::new(),
        };
    }

    let examples_raw = value_array(value, "examples");
    let sole = examples_raw.len() == 1;
    let examples = examples_raw
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let raw = RawItem::new(RawItemKind::Content, v.clone());
            normalize_item(&raw, guide_id, &item_group, i, ItemOrigin::Concept { sole })
        })
        .collect();

    Concept {
        id,
        title: str_field(value, &["title", "name"]).unwrap_or_else(|| title_from_key(key)),
        definition: str_field(value, &["definition", "description", "meaning"])
            .unwrap_or_default(),
        examples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guideforge_shared::ContentType;
    use serde_json::json;

    fn guide() -> GuideId {
        GuideId::new("nouns_grammar")
    }

    #[test]
    fn absent_block_yields_nothing() {
        assert!(extract_concepts(&guide(), &json!({ "title": "X" })).is_empty());
    }

    #[test]
    fn map_block_with_definitions_and_examples() {
        let doc = json!({
            "basic_concepts": {
                "countable_nouns": {
                    "definition": "Nouns with singular and plural forms.",
                    "examples": ["one server, two servers", "a bug, many bugs"]
                },
                "uncountable_nouns": "Nouns without a plural form."
            }
        });

        let concepts = extract_concepts(&guide(), &doc);
        assert_eq!(concepts.len(), 2);

        let countable = &concepts[0];
        assert_eq!(countable.id, "countable-nouns");
        assert_eq!(countable.title, "Countable Nouns");
        assert_eq!(countable.examples.len(), 2);
        assert_eq!(
            countable.examples[0].id,
            "nouns_grammar-concept-countable-nouns-0"
        );

        let uncountable = &concepts[1];
        assert_eq!(uncountable.definition, "Nouns without a plural form.");
        assert!(uncountable.examples.is_empty());
    }

    #[test]
    fn sole_example_is_typed_definition() {
        let doc = json!({
            "basic_concepts": {
                "article": { "examples": ["a word placed before a noun"] }
            }
        });

        let concepts = extract_concepts(&guide(), &doc);
        assert_eq!(concepts[0].examples.len(), 1);
        assert_eq!(concepts[0].examples[0].content_type, ContentType::Definition);
    }

    #[test]
    fn array_block_uses_positional_ids() {
        let doc = json!({
            "basic_concepts": [
                { "title": "Subject", "definition": "Who performs the action." },
                { "title": "Object", "definition": "Who receives the action." }
            ]
        });

        let concepts = extract_concepts(&guide(), &doc);
        assert_eq!(concepts.len(), 2);
        assert_eq!(concepts[0].id, "0");
        assert_eq!(concepts[0].title, "Subject");
        assert_eq!(concepts[1].title, "Object");
    }
}
