//! Raw document loading from a content root on disk.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use guideforge_shared::{GuideError, GuideId, Result};

use crate::locator::Location;

/// A raw legacy document: parsed JSON plus provenance of the read.
///
/// The hash and byte length let callers memoize by guide id and detect
/// upstream content changes without re-reading.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// The parsed, still shape-agnostic document.
    pub value: serde_json::Value,
    /// SHA-256 of the raw bytes, hex-encoded.
    pub content_hash: String,
    /// Size of the raw bytes.
    pub byte_len: usize,
}

/// Byte-read capability keyed by a resolved location.
///
/// The engine needs nothing else from storage: no write, no delete. The one
/// read this trait performs is the only side effect in a guide
/// transformation.
pub trait GuideStore: Send + Sync {
    /// Read and parse the document at `location`.
    fn fetch(
        &self,
        location: &Location,
    ) -> impl std::future::Future<Output = Result<RawDocument>> + Send;
}

/// Filesystem-backed guide store reading from a content root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every guide id present under the content root.
    ///
    /// Walks each category directory and collects `*.json` file stems. The
    /// result is sorted so catalog builds are deterministic. Listing is a
    /// convenience for catalog tooling; the engine itself only ever reads.
    pub async fn list_guides(&self) -> Result<Vec<GuideId>> {
        let mut ids = Vec::new();

        let mut top = match tokio::fs::read_dir(&self.root).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
            Err(e) => return Err(GuideError::unreadable(&self.root, e)),
        };

        while let Some(entry) = top
            .next_entry()
            .await
            .map_err(|e| GuideError::unreadable(&self.root, e))?
        {
            let dir_path = entry.path();
            if !dir_path.is_dir() {
                continue;
            }

            let mut dir = tokio::fs::read_dir(&dir_path)
                .await
                .map_err(|e| GuideError::unreadable(&dir_path, e))?;

            while let Some(file) = dir
                .next_entry()
                .await
                .map_err(|e| GuideError::unreadable(&dir_path, e))?
            {
                let path = file.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        ids.push(GuideId::new(stem));
                    }
                }
            }
        }

        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        Ok(ids)
    }
}

impl GuideStore for FsStore {
    async fn fetch(&self, location: &Location) -> Result<RawDocument> {
        let path = self.root.join(&location.path);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GuideError::not_found(location.guide_id.as_str()));
            }
            Err(e) => return Err(GuideError::unreadable(&path, e)),
        };

        let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
            GuideError::malformed(format!("{}: {e}", location.guide_id))
        })?;

        let content_hash = {
            let mut hasher = Sha256::new();
            hasher.update(&bytes);
            format!("{:x}", hasher.finalize())
        };

        debug!(
            guide_id = %location.guide_id,
            bytes = bytes.len(),
            "loaded raw document"
        );

        Ok(RawDocument {
            value,
            content_hash,
            byte_len: bytes.len(),
        })
    }
}
