//! Content sources feeding the indexer.

pub mod excerpt;
pub mod markdown;

use std::path::{Path, PathBuf};

use crate::model::types::ContentRecord;

/// Where a source should look for content.
#[derive(Debug, Clone)]
pub struct ScanContext {
    /// Root directory of the content tree.
    pub content_root: PathBuf,
}

impl ScanContext {
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
        }
    }
}

/// A record together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedRecord {
    pub source_path: PathBuf,
    /// Path relative to the content root, `/`-separated. Stable across builds.
    pub relative_id: String,
    pub record: ContentRecord,
}

pub trait ContentSource {
    /// Load all records under the context root, in build order.
    fn scan(&self, ctx: &ScanContext) -> anyhow::Result<Vec<SourcedRecord>>;
}

/// `/`-joined path of `path` relative to `root`, or `None` when outside it.
pub fn relative_id(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
