//! Core domain types for the GuideForge unified guide model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current schema version for the unified guide format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// GuideId
// ---------------------------------------------------------------------------

/// An opaque guide identifier, exactly as callers request it.
///
/// Guide ids are stable across reloads and double as the prefix of every
/// content-item id inside the guide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuideId(pub String);

impl GuideId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GuideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GuideId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for GuideId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// GuideCategory
// ---------------------------------------------------------------------------

/// Topical grouping a guide belongs to.
///
/// The closed set matches the content tree on disk: one directory per
/// category. A guide's category is derived from its id by
/// [`GuideCategory::from_guide_id`] and never stored in the legacy document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuideCategory {
    QuestionMaterial,
    ComplexGrammar,
    CauseEffect,
    Concepts,
    VerbConjugation,
    Interview,
    ProblemCatalog,
    BasicGrammar,
}

/// Keyword dispatch table for [`GuideCategory::from_guide_id`].
///
/// Evaluated top to bottom; the first rule with any matching substring wins.
/// The order is load-bearing: an id containing both "conditional" and
/// "concepts" must resolve to complex grammar, because that is where the
/// existing content tree placed it.
const CATEGORY_RULES: &[(&[&str], GuideCategory)] = &[
    (&["questions"], GuideCategory::QuestionMaterial),
    (
        &["conditional", "passive", "perfect", "clauses", "modifiers"],
        GuideCategory::ComplexGrammar,
    ),
    (&["cause_effect"], GuideCategory::CauseEffect),
    (&["concepts"], GuideCategory::Concepts),
    (&["conjugation"], GuideCategory::VerbConjugation),
    (&["interview"], GuideCategory::Interview),
    (&["problems"], GuideCategory::ProblemCatalog),
];

impl GuideCategory {
    /// Classify a guide id into its category.
    ///
    /// Total over all inputs; ids matching no rule fall back to
    /// [`GuideCategory::BasicGrammar`]. Both the locator and the assembler go
    /// through this one function, so a guide's self-reported category always
    /// matches where it was found.
    pub fn from_guide_id(guide_id: &str) -> Self {
        for (keywords, category) in CATEGORY_RULES {
            if keywords.iter().any(|kw| guide_id.contains(kw)) {
                return *category;
            }
        }
        Self::BasicGrammar
    }

    /// Directory name for this category under the content root.
    pub fn dir(&self) -> &'static str {
        match self {
            Self::QuestionMaterial => "question_material",
            Self::ComplexGrammar => "complex_grammar",
            Self::CauseEffect => "cause_effect",
            Self::Concepts => "concepts",
            Self::VerbConjugation => "verb_conjugation",
            Self::Interview => "interview",
            Self::ProblemCatalog => "problem_catalogs",
            Self::BasicGrammar => "basic_grammar",
        }
    }

    /// Stable kebab-case slug, matching the serialized form.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::QuestionMaterial => "question-material",
            Self::ComplexGrammar => "complex-grammar",
            Self::CauseEffect => "cause-effect",
            Self::Concepts => "concepts",
            Self::VerbConjugation => "verb-conjugation",
            Self::Interview => "interview",
            Self::ProblemCatalog => "problem-catalog",
            Self::BasicGrammar => "basic-grammar",
        }
    }

    /// Parse a slug back into a category. Used for per-context overrides in
    /// legacy documents.
    pub fn parse_slug(s: &str) -> Option<Self> {
        let all = [
            Self::QuestionMaterial,
            Self::ComplexGrammar,
            Self::CauseEffect,
            Self::Concepts,
            Self::VerbConjugation,
            Self::Interview,
            Self::ProblemCatalog,
            Self::BasicGrammar,
        ];
        all.into_iter().find(|c| c.slug() == s || c.dir() == s)
    }
}

impl std::fmt::Display for GuideCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Difficulty classification for guides, contexts, and content items.
///
/// Ordered easiest first; ties in aggregate computations resolve toward the
/// lower level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse a legacy difficulty label. Legacy files are inconsistent, so a
    /// couple of synonyms are accepted; anything else is treated as absent.
    pub fn parse_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "basic" | "elementary" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" | "expert" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// All levels, easiest first.
    pub fn all() -> [Self; 3] {
        [Self::Beginner, Self::Intermediate, Self::Advanced]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// Kind of instructional material a content item carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Phrase,
    Sentence,
    Example,
    Definition,
    Pattern,
}

// ---------------------------------------------------------------------------
// ContentItem
// ---------------------------------------------------------------------------

/// The atomic unit of instructional material.
///
/// `id` is `{guideId}-{contextId}-{index}`, unique within the owning guide
/// without any cross-group coordination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// The primary natural-language string.
    pub text: String,
    /// Disambiguating usage label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Exercise
// ---------------------------------------------------------------------------

/// A practice exercise attached to a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// One topical grouping of content items, the unified replacement for
/// whichever shape-specific grouping the legacy document used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Derived from the legacy group key when present, else a positional slug.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Inherited from the guide-level category unless the legacy group
    /// carried an explicit override.
    pub category: GuideCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Preserves the legacy group's original item ordering.
    pub content: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exercises: Vec<Exercise>,
}

// ---------------------------------------------------------------------------
// Concept
// ---------------------------------------------------------------------------

/// A top-level definition extracted from a legacy "basic concepts" block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ContentItem>,
}

// ---------------------------------------------------------------------------
// GuideMetadata
// ---------------------------------------------------------------------------

/// Derived aggregate block, recomputed on every transformation.
///
/// `total_content` is the live sum over contexts plus concept examples; a
/// count found in the legacy document is never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideMetadata {
    pub total_content: usize,
    pub total_exercises: usize,
    pub difficulty: Difficulty,
    pub category: GuideCategory,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub professional_areas: Vec<String>,
    pub estimated_study_minutes: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_audience: Vec<String>,
}

// ---------------------------------------------------------------------------
// UnifiedGuide
// ---------------------------------------------------------------------------

/// The canonical, versioned guide document returned to all consumers.
///
/// Constructed fresh per request, immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedGuide {
    pub schema_version: u32,
    pub id: GuideId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concepts: Vec<Concept>,
    pub contexts: Vec<Context>,
    pub metadata: GuideMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_id_roundtrip() {
        let id = GuideId::new("modifiers_grammar");
        let s = id.to_string();
        let parsed: GuideId = s.parse().expect("parse GuideId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn category_dispatch_priority() {
        use GuideCategory::*;
        assert_eq!(GuideCategory::from_guide_id("modifiers_grammar"), ComplexGrammar);
        assert_eq!(
            GuideCategory::from_guide_id("database_improvement_concepts"),
            Concepts
        );
        assert_eq!(
            GuideCategory::from_guide_id("software_development_cause_effect"),
            CauseEffect
        );
        assert_eq!(GuideCategory::from_guide_id("verb_conjugation_guide"), VerbConjugation);
        assert_eq!(GuideCategory::from_guide_id("nouns_grammar"), BasicGrammar);
    }

    #[test]
    fn category_dispatch_ties_break_by_rule_order() {
        // "questions" outranks everything; "conditional" outranks "concepts".
        assert_eq!(
            GuideCategory::from_guide_id("interview_questions"),
            GuideCategory::QuestionMaterial
        );
        assert_eq!(
            GuideCategory::from_guide_id("conditional_concepts"),
            GuideCategory::ComplexGrammar
        );
    }

    #[test]
    fn category_slug_roundtrip() {
        for c in [
            GuideCategory::QuestionMaterial,
            GuideCategory::ComplexGrammar,
            GuideCategory::CauseEffect,
            GuideCategory::Concepts,
            GuideCategory::VerbConjugation,
            GuideCategory::Interview,
            GuideCategory::ProblemCatalog,
            GuideCategory::BasicGrammar,
        ] {
            assert_eq!(GuideCategory::parse_slug(c.slug()), Some(c));
        }
        assert_eq!(GuideCategory::parse_slug("unknown"), None);
    }

    #[test]
    fn difficulty_labels() {
        assert_eq!(Difficulty::parse_label("Beginner"), Some(Difficulty::Beginner));
        assert_eq!(Difficulty::parse_label("basic"), Some(Difficulty::Beginner));
        assert_eq!(Difficulty::parse_label("ADVANCED"), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::parse_label("medium"), None);
    }

    #[test]
    fn content_item_serialization_skips_empty_optionals() {
        let item = ContentItem {
            id: "nouns_grammar-plurals-0".into(),
            content_type: ContentType::Phrase,
            text: "a handful of edge cases".into(),
            context: None,
            meaning: None,
            translation: None,
            difficulty: None,
            tags: vec![],
        };

        let json = serde_json::to_string(&item).expect("serialize");
        assert!(json.contains(r#""type":"phrase""#));
        assert!(!json.contains("meaning"));
        assert!(!json.contains("tags"));

        let parsed: ContentItem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, item);
    }

    #[test]
    fn unified_guide_serialization_roundtrip() {
        let guide = UnifiedGuide {
            schema_version: CURRENT_SCHEMA_VERSION,
            id: GuideId::new("nouns_grammar"),
            title: "Nouns".into(),
            description: "Countable and uncountable nouns.".into(),
            version: "1.0".into(),
            created_at: None,
            updated_at: None,
            concepts: vec![],
            contexts: vec![Context {
                id: "plurals".into(),
                title: "Plurals".into(),
                description: String::new(),
                category: GuideCategory::BasicGrammar,
                difficulty: Some(Difficulty::Beginner),
                content: vec![],
                examples: vec![],
                exercises: vec![],
            }],
            metadata: GuideMetadata {
                total_content: 0,
                total_exercises: 0,
                difficulty: Difficulty::Beginner,
                category: GuideCategory::BasicGrammar,
                professional_areas: vec![],
                estimated_study_minutes: 5,
                target_audience: vec!["language-learners".into()],
            },
        };

        let json = serde_json::to_string_pretty(&guide).expect("serialize");
        assert!(json.contains(r#""schemaVersion": 1"#));
        assert!(json.contains(r#""totalContent": 0"#));
        assert!(json.contains(r#""category": "basic-grammar""#));

        let parsed: UnifiedGuide = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, guide);
    }
}
