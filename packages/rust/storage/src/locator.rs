//! Guide locator: maps an opaque guide id to a storage location.

use std::path::PathBuf;

use guideforge_shared::{GuideCategory, GuideId};

/// A resolved storage location for a guide.
///
/// `path` is relative to the content root and is always
/// `<category-dir>/<guide-id>.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub guide_id: GuideId,
    pub category: GuideCategory,
    pub path: PathBuf,
}

/// Resolve a guide id to its location.
///
/// Pure and total: every id resolves to some location; whether a document
/// actually exists there is the loader's concern. Category dispatch is the
/// shared keyword rule, so the location always agrees with the category the
/// assembler later reports.
pub fn resolve(guide_id: &GuideId) -> Location {
    let category = GuideCategory::from_guide_id(guide_id.as_str());
    let path = PathBuf::from(category.dir()).join(format!("{guide_id}.json"));

    Location {
        guide_id: guide_id.clone(),
        category,
        path,
    }
}
