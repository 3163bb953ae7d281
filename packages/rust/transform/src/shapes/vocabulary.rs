//! Extractor for the `professional_vocabulary` legacy family.

use serde_json::{Value, json};

use super::{RawContextGroup, RawItem, RawItemKind, ShapeExtractor, entries};

/// Free-form vocabulary maps: term to definition (string or object). The
/// whole map becomes a single synthetic group with id `vocabulary`; the map
/// key is folded into each item so the normalizer can fall back to it as the
/// item text.
pub struct VocabularyShape;

impl ShapeExtractor for VocabularyShape {
    fn detect(&self, doc: &Value) -> bool {
        doc.get("professional_vocabulary").is_some()
    }

    fn extract(&self, doc: &Value) -> Vec<RawContextGroup> {
        let Some(grouping) = doc.get("professional_vocabulary") else {
            return Vec::new();
        };

        let items = entries(grouping)
            .into_iter()
            .map(|(term, entry)| {
                let value = match entry {
                    Value::Object(map) => {
                        let mut merged = map.clone();
                        merged
                            .entry("term".to_string())
                            .or_insert_with(|| Value::String(term.clone()));
                        Value::Object(merged)
                    }
                    Value::String(definition) => {
                        json!({ "term": term, "definition": definition })
                    }
                    _ => json!({ "term": term }),
                };
                RawItem::new(RawItemKind::VocabularyEntry, value)
            })
            .collect();

        vec![RawContextGroup {
            id: "vocabulary".to_string(),
            title: "Professional Vocabulary".to_string(),
            description: String::new(),
            difficulty: None,
            category_override: None,
            items,
            examples: Vec::new(),
            exercises: Vec::new(),
        }]
    }

    fn name(&self) -> &'static str {
        "professional_vocabulary"
    }
}
