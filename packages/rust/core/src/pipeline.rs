//! End-to-end guide pipeline: id → locate → load → extract → normalize →
//! assemble.
//!
//! Apart from the single storage read, everything here is pure computation;
//! concurrent loads share no mutable state and need no coordination.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use guideforge_shared::{
    GuideCategory, GuideId, Result, TransformOptions, UnifiedGuide,
};
use guideforge_storage::{GuideStore, locator};
use guideforge_transform::{ShapeRegistry, build_context, extract_concepts};

use crate::assembler::{self, legacy_meta};

// ---------------------------------------------------------------------------
// Single-guide pipeline
// ---------------------------------------------------------------------------

/// Load and transform one guide.
///
/// The single inbound operation of the engine. Each call is a self-contained,
/// independently cancellable unit; a timeout on one load never affects
/// others in flight.
#[instrument(skip(store, options), fields(guide_id = %guide_id))]
pub async fn load_guide<S: GuideStore>(
    store: &S,
    guide_id: &GuideId,
    options: &TransformOptions,
) -> Result<UnifiedGuide> {
    let location = locator::resolve(guide_id);
    debug!(category = %location.category, path = %location.path.display(), "resolved location");

    let raw = store.fetch(&location).await?;
    transform_document(guide_id, &raw.value, options)
}

/// Transform an already-parsed legacy document.
///
/// Pure and deterministic: the same document and options always produce the
/// same unified guide, byte for byte.
pub fn transform_document(
    guide_id: &GuideId,
    doc: &Value,
    options: &TransformOptions,
) -> Result<UnifiedGuide> {
    let registry = ShapeRegistry::new();
    let (shape, groups) = registry.extract(doc);

    let category = GuideCategory::from_guide_id(guide_id.as_str());
    let contexts = groups
        .iter()
        .map(|group| build_context(group, guide_id, category))
        .collect::<Vec<_>>();

    let concepts = extract_concepts(guide_id, doc);

    debug!(
        shape,
        contexts = contexts.len(),
        concepts = concepts.len(),
        "document extracted"
    );

    assembler::assemble(legacy_meta(guide_id, doc), concepts, contexts, options)
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for catalog builds.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called as each guide finishes, successfully or not.
    fn guide_finished(&self, guide_id: &str, ok: bool, current: usize, total: usize);
    /// Called when the whole catalog build completes.
    fn done(&self, report: &CatalogReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn guide_finished(&self, _guide_id: &str, _ok: bool, _current: usize, _total: usize) {}
    fn done(&self, _report: &CatalogReport) {}
}

// ---------------------------------------------------------------------------
// Catalog building
// ---------------------------------------------------------------------------

/// One successfully loaded guide in a catalog report.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub guide_id: GuideId,
    pub title: String,
    pub category: GuideCategory,
    pub total_content: usize,
}

/// One failed guide in a catalog report, with its distinguishable reason.
#[derive(Debug, Clone)]
pub struct CatalogFailure {
    pub guide_id: GuideId,
    pub reason: String,
    pub retryable: bool,
}

/// Outcome of a bulk catalog load.
#[derive(Debug)]
pub struct CatalogReport {
    pub loaded: Vec<CatalogEntry>,
    pub failures: Vec<CatalogFailure>,
    pub elapsed: std::time::Duration,
}

impl CatalogReport {
    pub fn total(&self) -> usize {
        self.loaded.len() + self.failures.len()
    }
}

/// Load many guides concurrently and report per-guide outcomes.
///
/// Each guide runs as its own task; one failing, slow, or cancelled load
/// never takes the others down. Failures land in the report with their
/// specific reason so tooling can isolate the failing identifier.
pub async fn build_catalog<S>(
    store: Arc<S>,
    ids: &[GuideId],
    options: &TransformOptions,
    concurrency: usize,
    progress: &dyn ProgressReporter,
) -> CatalogReport
where
    S: GuideStore + 'static,
{
    let start = Instant::now();
    let total = ids.len();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    progress.phase("Loading guides");

    let mut tasks = JoinSet::new();
    for guide_id in ids {
        let store = Arc::clone(&store);
        let semaphore = Arc::clone(&semaphore);
        let guide_id = guide_id.clone();
        let options = options.clone();

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            let result = load_guide(store.as_ref(), &guide_id, &options).await;
            (guide_id, result)
        });
    }

    let mut loaded = Vec::new();
    let mut failures = Vec::new();
    let mut finished = 0usize;

    while let Some(joined) = tasks.join_next().await {
        finished += 1;
        match joined {
            Ok((guide_id, Ok(guide))) => {
                progress.guide_finished(guide_id.as_str(), true, finished, total);
                loaded.push(CatalogEntry {
                    guide_id,
                    title: guide.title,
                    category: guide.metadata.category,
                    total_content: guide.metadata.total_content,
                });
            }
            Ok((guide_id, Err(e))) => {
                warn!(guide_id = %guide_id, error = %e, "guide load failed");
                progress.guide_finished(guide_id.as_str(), false, finished, total);
                failures.push(CatalogFailure {
                    guide_id,
                    reason: e.to_string(),
                    retryable: e.is_retryable(),
                });
            }
            Err(join_err) => {
                // A cancelled or panicked task is isolated to its own guide.
                warn!(error = %join_err, "catalog task aborted");
            }
        }
    }

    loaded.sort_by(|a, b| a.guide_id.as_str().cmp(b.guide_id.as_str()));
    failures.sort_by(|a, b| a.guide_id.as_str().cmp(b.guide_id.as_str()));

    let report = CatalogReport {
        loaded,
        failures,
        elapsed: start.elapsed(),
    };

    info!(
        loaded = report.loaded.len(),
        failed = report.failures.len(),
        elapsed_ms = report.elapsed.as_millis(),
        "catalog build complete"
    );

    progress.done(&report);
    report
}
