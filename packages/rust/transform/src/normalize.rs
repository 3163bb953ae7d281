//! Content normalization: raw legacy items into unified content items.
//!
//! Legacy items arrive with wildly inconsistent field names (or as bare
//! strings). Normalization substitutes defaults for anything missing rather
//! than failing: one malformed item must never invalidate an otherwise-usable
//! guide.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use guideforge_shared::{
    ContentItem, ContentType, Context, Difficulty, Exercise, GuideCategory, GuideId,
};

use crate::shapes::{
    RawContextGroup, RawItem, RawItemKind, str_field, string_array,
};
use crate::text::slugify;

// ---------------------------------------------------------------------------
// Sentence heuristic (compiled once)
// ---------------------------------------------------------------------------

/// Matches terminal punctuation at the end of a candidate sentence.
static TERMINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s*$").expect("terminal regex"));

/// Matches clause separators: punctuation or common conjunctions.
static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[,;:]|\b(and|but|or|because|when|if|while|although|so)\b")
        .expect("clause regex")
});

/// Where an item came from, for the type-inference rules that depend on
/// position rather than fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrigin {
    /// Regular member of a context's content list.
    Context,
    /// Member of a group-level `examples` array.
    GroupExample,
    /// Member of a concept's examples; `sole` marks the only item.
    Concept { sole: bool },
}

// ---------------------------------------------------------------------------
// Item normalization
// ---------------------------------------------------------------------------

/// Normalize one raw item into a [`ContentItem`].
///
/// Deterministic and side-effect-free. The id is
/// `{guideId}-{groupId}-{index}`, unique within the guide without any
/// coordination across groups.
pub fn normalize_item(
    raw: &RawItem,
    guide_id: &GuideId,
    group_id: &str,
    index: usize,
    origin: ItemOrigin,
) -> ContentItem {
    let value = &raw.value;

    let mut text = primary_text(value);
    let mut meaning = str_field(value, &["meaning", "definition"]);
    let mut tags = string_array(value, "tags");

    match raw.kind {
        RawItemKind::VerbPair => {
            if let Some(verb) = str_field(value, &["verb", "cause"]) {
                text = Some(verb);
            }
            if meaning.is_none() {
                meaning = str_field(value, &["effect", "description"]);
            }
        }
        RawItemKind::Problem => {
            if let Some(problem) = str_field(value, &["problem", "description"]) {
                text = Some(problem);
            }
            let impact = str_field(value, &["impact"]);
            let mitigation = str_field(value, &["mitigation"]);
            meaning = match (&impact, &mitigation) {
                (Some(i), Some(m)) => {
                    // Both present: compose, and mark the item so consumers
                    // know the composed meaning carries both parts.
                    tags = vec!["impact".to_string(), "mitigation".to_string()];
                    Some(format!("{i} | {m}"))
                }
                (Some(i), None) => Some(i.clone()),
                (None, Some(m)) => Some(m.clone()),
                (None, None) => meaning,
            };
        }
        RawItemKind::VocabularyEntry => {
            if text.is_none() {
                text = str_field(value, &["term"]);
            }
        }
        _ => {}
    }

    let text = text.unwrap_or_default();
    let content_type = infer_type(raw, &text, origin);

    ContentItem {
        id: format!("{guide_id}-{group_id}-{index}"),
        content_type,
        text,
        context: str_field(value, &["context", "usage"]),
        meaning,
        translation: str_field(value, &["translation"]),
        difficulty: str_field(value, &["difficulty"])
            .as_deref()
            .and_then(Difficulty::parse_label),
        tags,
    }
}

/// The primary natural-language string of an item, wherever it hides.
fn primary_text(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        let trimmed = s.trim();
        return (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
    str_field(
        value,
        &["text", "phrase", "sentence", "pattern", "formation_rule", "example"],
    )
}

/// Infer the content type from available fields.
///
/// Rules are checked in a fixed order; ties resolve toward the earlier rule.
fn infer_type(raw: &RawItem, text: &str, origin: ItemOrigin) -> ContentType {
    let value = &raw.value;

    if str_field(value, &["pattern", "formation_rule"]).is_some() {
        return ContentType::Pattern;
    }

    let looks_like_sentence =
        TERMINAL_RE.is_match(text) && CLAUSE_RE.is_match(&text.to_lowercase());
    if raw.kind == RawItemKind::Sentence
        || value.get("sentence").is_some()
        || looks_like_sentence
    {
        return ContentType::Sentence;
    }

    let example_marker = value.get("example").is_some()
        || value.get("type").and_then(Value::as_str) == Some("example")
        || origin == ItemOrigin::GroupExample;
    if example_marker {
        return ContentType::Example;
    }

    if origin == (ItemOrigin::Concept { sole: true }) {
        return ContentType::Definition;
    }

    ContentType::Phrase
}

// ---------------------------------------------------------------------------
// Exercise normalization
// ---------------------------------------------------------------------------

/// Normalize one raw exercise entry.
pub fn normalize_exercise(
    value: &Value,
    guide_id: &GuideId,
    context_id: &str,
    index: usize,
) -> Exercise {
    let prompt = value
        .as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| str_field(value, &["question", "prompt", "exercise", "text"]))
        .unwrap_or_default();

    let mut choices = string_array(value, "options");
    if choices.is_empty() {
        choices = string_array(value, "choices");
    }

    Exercise {
        id: format!("{guide_id}-{context_id}-exercise-{index}"),
        prompt,
        answer: str_field(value, &["answer", "correct_answer", "solution"]),
        choices,
    }
}

// ---------------------------------------------------------------------------
// Context assembly
// ---------------------------------------------------------------------------

/// Build a unified [`Context`] from an extracted group.
///
/// The context id is the slug of the legacy group key (or the positional
/// index for array-shaped groupings). Category is inherited from the guide
/// unless the group carried a recognizable override label.
pub fn build_context(
    group: &RawContextGroup,
    guide_id: &GuideId,
    guide_category: GuideCategory,
) -> Context {
    let id = slugify(&group.id);

    let category = group
        .category_override
        .as_deref()
        .and_then(GuideCategory::parse_slug)
        .unwrap_or(guide_category);

    let content = group
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| normalize_item(item, guide_id, &id, i, ItemOrigin::Context))
        .collect();

    let example_group = format!("{id}-example");
    let examples = group
        .examples
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let raw = RawItem::new(RawItemKind::Content, v.clone());
            normalize_item(&raw, guide_id, &example_group, i, ItemOrigin::GroupExample)
        })
        .collect();

    let exercises = group
        .exercises
        .iter()
        .enumerate()
        .map(|(i, v)| normalize_exercise(v, guide_id, &id, i))
        .collect();

    Context {
        id,
        title: group.title.clone(),
        description: group.description.clone(),
        category,
        difficulty: group.difficulty,
        content,
        examples,
        exercises,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn guide() -> GuideId {
        GuideId::new("nouns_grammar")
    }

    fn item(kind: RawItemKind, value: Value) -> RawItem {
        RawItem::new(kind, value)
    }

    #[test]
    fn id_scheme_is_guide_group_index() {
        let raw = item(RawItemKind::Phrase, json!("a rough estimate"));
        let out = normalize_item(&raw, &guide(), "estimates", 3, ItemOrigin::Context);
        assert_eq!(out.id, "nouns_grammar-estimates-3");
    }

    #[test]
    fn bare_string_becomes_phrase() {
        let raw = item(RawItemKind::Phrase, json!("on the same page"));
        let out = normalize_item(&raw, &guide(), "g", 0, ItemOrigin::Context);
        assert_eq!(out.content_type, ContentType::Phrase);
        assert_eq!(out.text, "on the same page");
        assert!(out.meaning.is_none());
    }

    #[test]
    fn pattern_field_wins_over_everything() {
        let raw = item(
            RawItemKind::Content,
            json!({
                "pattern": "have + past participle",
                "sentence": "I have finished the report."
            }),
        );
        let out = normalize_item(&raw, &guide(), "g", 0, ItemOrigin::Context);
        assert_eq!(out.content_type, ContentType::Pattern);
    }

    #[test]
    fn sentence_field_and_heuristic() {
        let raw = item(
            RawItemKind::Content,
            json!({ "sentence": "We shipped it." }),
        );
        let out = normalize_item(&raw, &guide(), "g", 0, ItemOrigin::Context);
        assert_eq!(out.content_type, ContentType::Sentence);

        // Terminal punctuation plus a clause marker.
        let raw = item(
            RawItemKind::Content,
            json!({ "text": "If the tests pass, we merge on Friday." }),
        );
        let out = normalize_item(&raw, &guide(), "g", 1, ItemOrigin::Context);
        assert_eq!(out.content_type, ContentType::Sentence);

        // Terminal punctuation alone is not enough.
        let raw = item(RawItemKind::Content, json!({ "text": "Ship it." }));
        let out = normalize_item(&raw, &guide(), "g", 2, ItemOrigin::Context);
        assert_eq!(out.content_type, ContentType::Phrase);
    }

    #[test]
    fn sentences_field_family_is_typed_sentence() {
        let raw = item(RawItemKind::Sentence, json!("Standup starts at ten"));
        let out = normalize_item(&raw, &guide(), "g", 0, ItemOrigin::Context);
        assert_eq!(out.content_type, ContentType::Sentence);
    }

    #[test]
    fn example_marker_and_group_examples() {
        let raw = item(
            RawItemKind::Content,
            json!({ "example": "a worked example" }),
        );
        let out = normalize_item(&raw, &guide(), "g", 0, ItemOrigin::Context);
        assert_eq!(out.content_type, ContentType::Example);
        assert_eq!(out.text, "a worked example");

        let raw = item(RawItemKind::Content, json!("from the examples array"));
        let out = normalize_item(&raw, &guide(), "g", 1, ItemOrigin::GroupExample);
        assert_eq!(out.content_type, ContentType::Example);
    }

    #[test]
    fn sole_concept_item_is_definition() {
        let raw = item(RawItemKind::Content, json!("a noun names a thing"));
        let sole = normalize_item(
            &raw,
            &guide(),
            "g",
            0,
            ItemOrigin::Concept { sole: true },
        );
        assert_eq!(sole.content_type, ContentType::Definition);

        let not_sole = normalize_item(
            &raw,
            &guide(),
            "g",
            0,
            ItemOrigin::Concept { sole: false },
        );
        assert_eq!(not_sole.content_type, ContentType::Phrase);
    }

    #[test]
    fn verb_pair_text_and_meaning() {
        let raw = item(
            RawItemKind::VerbPair,
            json!({ "verb": "degrade", "effect": "response times climb" }),
        );
        let out = normalize_item(&raw, &guide(), "perf", 0, ItemOrigin::Context);
        assert_eq!(out.text, "degrade");
        assert_eq!(out.meaning.as_deref(), Some("response times climb"));
    }

    #[test]
    fn problem_composes_impact_and_mitigation() {
        let raw = item(
            RawItemKind::Problem,
            json!({
                "problem": "The rollout stalled",
                "impact": "mixed versions in the fleet",
                "mitigation": "roll back, redeploy in batches"
            }),
        );
        let out = normalize_item(&raw, &guide(), "deploys", 0, ItemOrigin::Context);
        assert_eq!(out.text, "The rollout stalled");
        assert_eq!(
            out.meaning.as_deref(),
            Some("mixed versions in the fleet | roll back, redeploy in batches")
        );
        assert_eq!(out.tags, vec!["impact", "mitigation"]);
    }

    #[test]
    fn problem_with_only_impact_gets_no_marker_tags() {
        let raw = item(
            RawItemKind::Problem,
            json!({ "problem": "Flaky test", "impact": "CI reruns waste an hour a day" }),
        );
        let out = normalize_item(&raw, &guide(), "ci", 0, ItemOrigin::Context);
        assert_eq!(out.meaning.as_deref(), Some("CI reruns waste an hour a day"));
        assert!(out.tags.is_empty());
    }

    #[test]
    fn vocabulary_falls_back_to_term() {
        let raw = item(
            RawItemKind::VocabularyEntry,
            json!({ "term": "rollback", "definition": "reverting a deployment" }),
        );
        let out = normalize_item(&raw, &guide(), "vocabulary", 0, ItemOrigin::Context);
        assert_eq!(out.text, "rollback");
        assert_eq!(out.meaning.as_deref(), Some("reverting a deployment"));
    }

    #[test]
    fn missing_fields_substitute_defaults() {
        let raw = item(RawItemKind::Content, json!({ "unexpected": 42 }));
        let out = normalize_item(&raw, &guide(), "g", 0, ItemOrigin::Context);
        assert_eq!(out.text, "");
        assert_eq!(out.content_type, ContentType::Phrase);
        assert!(out.meaning.is_none());
        assert!(out.tags.is_empty());
    }

    #[test]
    fn optional_attributes_are_carried() {
        let raw = item(
            RawItemKind::Phrase,
            json!({
                "phrase": "circle back",
                "context": "meetings",
                "meaning": "return to a topic later",
                "translation": "volver sobre el tema",
                "difficulty": "intermediate",
                "tags": ["idiom"]
            }),
        );
        let out = normalize_item(&raw, &guide(), "g", 0, ItemOrigin::Context);
        assert_eq!(out.context.as_deref(), Some("meetings"));
        assert_eq!(out.translation.as_deref(), Some("volver sobre el tema"));
        assert_eq!(out.difficulty, Some(Difficulty::Intermediate));
        assert_eq!(out.tags, vec!["idiom"]);
    }

    #[test]
    fn exercise_normalization() {
        let ex = normalize_exercise(
            &json!({
                "question": "Complete: If it ___ (rain), we stay in.",
                "answer": "rains",
                "options": ["rains", "rained", "will rain"]
            }),
            &guide(),
            "conditionals",
            0,
        );
        assert_eq!(ex.id, "nouns_grammar-conditionals-exercise-0");
        assert_eq!(ex.answer.as_deref(), Some("rains"));
        assert_eq!(ex.choices.len(), 3);

        let bare = normalize_exercise(&json!("Rewrite in passive voice"), &guide(), "c", 1);
        assert_eq!(bare.prompt, "Rewrite in passive voice");
        assert!(bare.answer.is_none());
    }

    #[test]
    fn build_context_inherits_and_overrides_category() {
        let group = RawContextGroup {
            id: "job_interviews".into(),
            title: "Job Interviews".into(),
            description: String::new(),
            difficulty: None,
            category_override: None,
            items: vec![],
            examples: vec![],
            exercises: vec![],
        };
        let ctx = build_context(&group, &guide(), GuideCategory::BasicGrammar);
        assert_eq!(ctx.id, "job-interviews");
        assert_eq!(ctx.category, GuideCategory::BasicGrammar);

        let overridden = RawContextGroup {
            category_override: Some("interview".into()),
            ..group
        };
        let ctx = build_context(&overridden, &guide(), GuideCategory::BasicGrammar);
        assert_eq!(ctx.category, GuideCategory::Interview);

        let unknown = RawContextGroup {
            id: "job_interviews".into(),
            title: "Job Interviews".into(),
            description: String::new(),
            difficulty: None,
            category_override: Some("no-such-category".into()),
            items: vec![],
            examples: vec![],
            exercises: vec![],
        };
        let ctx = build_context(&unknown, &guide(), GuideCategory::BasicGrammar);
        assert_eq!(ctx.category, GuideCategory::BasicGrammar);
    }

    #[test]
    fn build_context_preserves_item_order_and_ids() {
        let group = RawContextGroup {
            id: "phrasal_verbs".into(),
            title: "Phrasal Verbs".into(),
            description: String::new(),
            difficulty: Some(Difficulty::Advanced),
            category_override: None,
            items: vec![
                RawItem::new(RawItemKind::Phrase, json!("carry out")),
                RawItem::new(RawItemKind::Phrase, json!("roll out")),
                RawItem::new(RawItemKind::Phrase, json!("back up")),
            ],
            examples: vec![json!("We rolled out the fix overnight.")],
            exercises: vec![json!({ "question": "Use 'back up' in a sentence." })],
        };

        let ctx = build_context(&group, &guide(), GuideCategory::BasicGrammar);
        let texts: Vec<&str> = ctx.content.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["carry out", "roll out", "back up"]);

        let ids: Vec<&str> = ctx.content.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "nouns_grammar-phrasal-verbs-0",
                "nouns_grammar-phrasal-verbs-1",
                "nouns_grammar-phrasal-verbs-2",
            ]
        );

        assert_eq!(ctx.examples[0].id, "nouns_grammar-phrasal-verbs-example-0");
        assert_eq!(ctx.exercises[0].id, "nouns_grammar-phrasal-verbs-exercise-0");
        assert_eq!(ctx.difficulty, Some(Difficulty::Advanced));
    }
}
