//! Guide assembler: concepts + contexts + derived metadata into the unified
//! document.
//!
//! Every aggregate in the metadata block is recomputed here from the
//! transformed parts. Counts found in the legacy document are never trusted;
//! legacy files routinely carried stale totals.

use chrono::{DateTime, Utc};
use serde_json::Value;

use guideforge_shared::{
    CURRENT_SCHEMA_VERSION, Concept, Context, Difficulty, GuideCategory, GuideError,
    GuideId, GuideMetadata, Result, TransformOptions, UnifiedGuide,
};
use guideforge_transform::text::title_from_key;

// ---------------------------------------------------------------------------
// Legacy document metadata
// ---------------------------------------------------------------------------

/// Document-level fields read straight off the legacy document.
#[derive(Debug, Clone)]
pub struct LegacyMeta {
    pub guide_id: GuideId,
    pub title: Option<String>,
    pub description: String,
    pub version: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Read document-level metadata from a parsed legacy document.
pub fn legacy_meta(guide_id: &GuideId, doc: &Value) -> LegacyMeta {
    LegacyMeta {
        guide_id: guide_id.clone(),
        title: doc_str(doc, &["title", "name"]),
        description: doc_str(doc, &["description"]).unwrap_or_default(),
        version: doc_str(doc, &["version"]).unwrap_or_else(|| "1.0".to_string()),
        created_at: doc_timestamp(doc, "created_at"),
        updated_at: doc_timestamp(doc, "updated_at"),
    }
}

fn doc_str(doc: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|n| doc.get(n).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Timestamps are copied only when they parse; they are never defaulted to
/// the current time, so re-running a transformation stays byte-identical.
fn doc_timestamp(doc: &Value, name: &str) -> Option<DateTime<Utc>> {
    doc.get(name)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Combine the transformed parts into the final [`UnifiedGuide`].
///
/// Fails with `TransformationFailed` only when the document has neither a
/// title nor any extractable content; an empty-but-titled document is a valid
/// stub guide.
pub fn assemble(
    meta: LegacyMeta,
    concepts: Vec<Concept>,
    contexts: Vec<Context>,
    options: &TransformOptions,
) -> Result<UnifiedGuide> {
    let total_content: usize = contexts.iter().map(|c| c.content.len()).sum::<usize>()
        + concepts.iter().map(|c| c.examples.len()).sum::<usize>();
    let total_exercises: usize = contexts.iter().map(|c| c.exercises.len()).sum();

    let has_content = total_content > 0 || !concepts.is_empty() || !contexts.is_empty();
    if meta.title.is_none() && !has_content {
        return Err(GuideError::transformation_failed(
            meta.guide_id.as_str(),
            "document has no title and no extractable content",
        ));
    }

    let category = GuideCategory::from_guide_id(meta.guide_id.as_str());

    let metadata = GuideMetadata {
        total_content,
        total_exercises,
        difficulty: aggregate_difficulty(&contexts, options.default_difficulty),
        category,
        professional_areas: professional_areas(&meta.guide_id, &contexts),
        estimated_study_minutes: estimate_study_minutes(total_content, options),
        target_audience: target_audience(category),
    };

    let title = meta
        .title
        .unwrap_or_else(|| title_from_key(meta.guide_id.as_str()));

    Ok(UnifiedGuide {
        schema_version: CURRENT_SCHEMA_VERSION,
        id: meta.guide_id,
        title,
        description: meta.description,
        version: meta.version,
        created_at: meta.created_at,
        updated_at: meta.updated_at,
        concepts,
        contexts,
        metadata,
    })
}

/// Most frequent declared context difficulty; ties break toward the easier
/// level, and no declaration at all falls back to the configured default.
fn aggregate_difficulty(contexts: &[Context], default: Difficulty) -> Difficulty {
    let mut counts = [0usize; 3];
    for context in contexts {
        if let Some(d) = context.difficulty {
            counts[d as usize] += 1;
        }
    }

    let mut best: Option<(Difficulty, usize)> = None;
    for level in Difficulty::all() {
        let count = counts[level as usize];
        if count > 0 && best.is_none_or(|(_, c)| count > c) {
            best = Some((level, count));
        }
    }

    best.map(|(level, _)| level).unwrap_or(default)
}

/// Keyword table for professional-area tags, scanned over the guide id and
/// context titles. A closed vocabulary keeps the tags deterministic.
const AREA_KEYWORDS: &[(&str, &str)] = &[
    ("software", "software-development"),
    ("development", "software-development"),
    ("code", "software-development"),
    ("database", "databases"),
    ("deployment", "devops"),
    ("devops", "devops"),
    ("infrastructure", "devops"),
    ("interview", "interviews"),
    ("meeting", "meetings"),
    ("presentation", "presentations"),
    ("negotiation", "negotiations"),
    ("management", "management"),
];

fn professional_areas(guide_id: &GuideId, contexts: &[Context]) -> Vec<String> {
    let mut haystack = guide_id.as_str().to_lowercase();
    for context in contexts {
        haystack.push(' ');
        haystack.push_str(&context.title.to_lowercase());
    }

    let mut areas: Vec<String> = Vec::new();
    for (keyword, area) in AREA_KEYWORDS {
        if haystack.contains(keyword) && !areas.iter().any(|a| a == area) {
            areas.push((*area).to_string());
        }
    }
    areas
}

fn estimate_study_minutes(total_content: usize, options: &TransformOptions) -> u32 {
    let estimate = (total_content as u32).saturating_mul(options.minutes_per_item);
    estimate.max(options.minimum_study_minutes)
}

fn target_audience(category: GuideCategory) -> Vec<String> {
    let tags: &[&str] = match category {
        GuideCategory::Interview | GuideCategory::QuestionMaterial => {
            &["job-seekers", "professionals"]
        }
        GuideCategory::CauseEffect | GuideCategory::ProblemCatalog => {
            &["engineers", "professionals"]
        }
        GuideCategory::Concepts => &["engineers", "language-learners"],
        _ => &["language-learners", "professionals"],
    };
    tags.iter().map(|t| t.to_string()).collect()
}
