//! Shape classification and extraction for legacy guide documents.
//!
//! Legacy documents come in several incompatible shapes, each distinguished by
//! one top-level grouping key. Every shape gets one extractor converting its
//! groups into the shape-agnostic [`RawContextGroup`] form. Extractors are
//! held by [`ShapeRegistry`] in a fixed priority order, so classification is a
//! visible, testable data structure rather than an if/else chain.

mod cause_effect;
mod keyed;
mod problems;
mod sections;
mod vocabulary;

use serde_json::Value;

use guideforge_shared::Difficulty;

pub use cause_effect::CauseEffectShape;
pub use keyed::{
    CategoriesShape, PhasesShape, ProfessionalContextsShape, SpecializedAreasShape,
};
pub use problems::ProblemsShape;
pub use sections::SectionsShape;
pub use vocabulary::VocabularyShape;

/// Shape name used when no extractor matches: a minimal document with zero
/// contexts (possibly basic concepts only). Not an error.
pub const MINIMAL_SHAPE: &str = "minimal";

// ---------------------------------------------------------------------------
// Intermediate types
// ---------------------------------------------------------------------------

/// Which legacy field family an item was read from.
///
/// Resolved once at extraction time, so downstream normalization matches on
/// this tag instead of re-probing field presence at every use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawItemKind {
    Phrase,
    ComparativeAdjective,
    SuperlativeAdjective,
    Content,
    Sentence,
    VerbPair,
    Problem,
    VocabularyEntry,
}

/// A single raw content item plus its resolved field family.
#[derive(Debug, Clone)]
pub struct RawItem {
    pub kind: RawItemKind,
    pub value: Value,
}

impl RawItem {
    pub fn new(kind: RawItemKind, value: Value) -> Self {
        Self { kind, value }
    }
}

/// A shape-agnostic content group, halfway between a legacy grouping and a
/// unified context.
#[derive(Debug, Clone)]
pub struct RawContextGroup {
    /// Legacy group key, or positional index for array-shaped groupings.
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Option<Difficulty>,
    /// Legacy per-group category label, matched against known category slugs
    /// later; unknown labels fall back to the guide-level category.
    pub category_override: Option<String>,
    /// Original item ordering of the legacy group, preserved.
    pub items: Vec<RawItem>,
    pub examples: Vec<Value>,
    pub exercises: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Extractor trait
// ---------------------------------------------------------------------------

/// One pure extractor per recognized legacy shape.
pub trait ShapeExtractor: Send + Sync {
    /// Structural check: does this document carry the shape's top-level key?
    fn detect(&self, doc: &Value) -> bool;

    /// Convert the shape's groups into the shape-agnostic intermediate form.
    fn extract(&self, doc: &Value) -> Vec<RawContextGroup>;

    /// Shape name, matching the distinguishing top-level key.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds the shape extractors in classification priority order.
///
/// First match wins, guaranteeing a single shape per document even when keys
/// overlap. The order must stay stable: it is part of the format contract.
pub struct ShapeRegistry {
    extractors: Vec<Box<dyn ShapeExtractor>>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(ProfessionalContextsShape),
                Box::new(SectionsShape),
                Box::new(CategoriesShape),
                Box::new(PhasesShape),
                Box::new(SpecializedAreasShape),
                Box::new(CauseEffectShape),
                Box::new(ProblemsShape),
                Box::new(VocabularyShape),
            ],
        }
    }

    /// Find the first extractor whose `detect` matches.
    ///
    /// `None` means the minimal shape: a guide with zero contexts, which is
    /// valid (basic-concept-only and stub documents).
    pub fn classify(&self, doc: &Value) -> Option<&dyn ShapeExtractor> {
        self.extractors
            .iter()
            .map(|e| e.as_ref())
            .find(|e| e.detect(doc))
    }

    /// Classify and extract in one step.
    ///
    /// Returns the shape name and its groups; the minimal shape yields
    /// [`MINIMAL_SHAPE`] and no groups.
    pub fn extract(&self, doc: &Value) -> (&'static str, Vec<RawContextGroup>) {
        match self.classify(doc) {
            Some(extractor) => {
                tracing::debug!(shape = extractor.name(), "classified legacy document");
                (extractor.name(), extractor.extract(doc))
            }
            None => {
                tracing::debug!("no known shape key, treating as minimal document");
                (MINIMAL_SHAPE, Vec::new())
            }
        }
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Shared extraction helpers
// ---------------------------------------------------------------------------

/// Iterate a grouping value's entries as `(key, value)` pairs.
///
/// Mappings yield their keys (lexicographic order, deterministic); arrays
/// yield positional indexes as keys. Anything else yields nothing.
pub(crate) fn entries(value: &Value) -> Vec<(String, &Value)> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// Read the first present string field from `value`, trimmed.
pub(crate) fn str_field(value: &Value, names: &[&str]) -> Option<String> {
    for name in names {
        if let Some(s) = value.get(name).and_then(Value::as_str) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// Read a string array field from `value`, skipping non-string elements.
pub(crate) fn string_array(value: &Value, name: &str) -> Vec<String> {
    value
        .get(name)
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Read an array field as owned values.
pub(crate) fn value_array(value: &Value, name: &str) -> Vec<Value> {
    value
        .get(name)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classification_priority_first_match_wins() {
        let registry = ShapeRegistry::new();

        // A document carrying two grouping keys classifies by priority, not
        // by key order in the file.
        let doc = json!({
            "title": "Overlap",
            "categories": { "a": { "phrases": ["one"] } },
            "professional_contexts": { "b": { "phrases": ["two"] } }
        });
        assert_eq!(
            registry.classify(&doc).map(|e| e.name()),
            Some("professional_contexts")
        );

        let doc = json!({
            "title": "Overlap",
            "phases": {},
            "sections": []
        });
        assert_eq!(registry.classify(&doc).map(|e| e.name()), Some("sections"));
    }

    #[test]
    fn unknown_shape_is_minimal_not_error() {
        let registry = ShapeRegistry::new();
        let doc = json!({ "title": "Stub", "description": "No groups yet" });

        assert!(registry.classify(&doc).is_none());
        let (shape, groups) = registry.extract(&doc);
        assert_eq!(shape, MINIMAL_SHAPE);
        assert!(groups.is_empty());
    }

    #[test]
    fn entries_handles_maps_and_arrays() {
        let map = json!({ "b": 1, "a": 2 });
        let keys: Vec<String> = entries(&map).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);

        let arr = json!([10, 20]);
        let keys: Vec<String> = entries(&arr).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "1"]);

        assert!(entries(&json!("scalar")).is_empty());
    }

    #[test]
    fn str_field_probes_in_order() {
        let v = json!({ "name": "fallback", "title": "primary" });
        assert_eq!(str_field(&v, &["title", "name"]), Some("primary".into()));
        assert_eq!(str_field(&v, &["missing", "name"]), Some("fallback".into()));
        assert_eq!(str_field(&v, &["missing"]), None);
        assert_eq!(str_field(&json!({ "title": "  " }), &["title"]), None);
    }
}
