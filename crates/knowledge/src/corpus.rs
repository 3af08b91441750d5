//! FAQ corpus loading.
//!
//! The corpus is a JSON document with an ordered `faqs` array. `CorpusStore`
//! owns the location and the reload policy and hands out read-only snapshots.

use crate::types::{FaqDocument, FaqEntry};
use faqbot_core::{AppError, AppResult, CorpusReload};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read and parse the corpus at `path`.
///
/// Error messages are safe to show to callers; the path only goes to the log.
pub async fn load_corpus(path: &Path) -> AppResult<Vec<FaqEntry>> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        tracing::error!("Failed to read FAQ corpus at {:?}: {}", path, e);
        match e.kind() {
            ErrorKind::NotFound => AppError::CorpusUnavailable("corpus file not found".to_string()),
            _ => AppError::CorpusUnavailable(format!("failed to read corpus: {}", e)),
        }
    })?;

    parse_corpus(&contents).inspect_err(|e| {
        tracing::error!("Rejected FAQ corpus at {:?}: {}", path, e);
    })
}

/// Parse a corpus document and check id uniqueness.
pub fn parse_corpus(contents: &str) -> AppResult<Vec<FaqEntry>> {
    let document: FaqDocument = serde_json::from_str(contents)
        .map_err(|e| AppError::CorpusUnavailable(format!("malformed corpus: {}", e)))?;

    let mut seen = HashSet::with_capacity(document.faqs.len());
    for faq in &document.faqs {
        if !seen.insert(faq.id.as_str()) {
            return Err(AppError::CorpusUnavailable(format!(
                "duplicate FAQ id: {}",
                faq.id
            )));
        }
    }

    Ok(document.faqs)
}

/// Owned handle on the corpus location.
#[derive(Debug)]
pub struct CorpusStore {
    path: PathBuf,
    reload: CorpusReload,
    cached: RwLock<Option<Arc<[FaqEntry]>>>,
}

impl CorpusStore {
    pub fn new(path: impl Into<PathBuf>, reload: CorpusReload) -> Self {
        Self {
            path: path.into(),
            reload,
            cached: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current corpus snapshot.
    ///
    /// With `CorpusReload::Always` this reads the file every call. With
    /// `CorpusReload::Cached` the first successful load is reused until
    /// [`CorpusStore::invalidate`]; failed loads are never cached.
    pub async fn snapshot(&self) -> AppResult<Arc<[FaqEntry]>> {
        if self.reload == CorpusReload::Cached {
            if let Some(faqs) = self.cached.read().await.as_ref() {
                return Ok(Arc::clone(faqs));
            }
        }

        let faqs: Arc<[FaqEntry]> = load_corpus(&self.path).await?.into();
        tracing::debug!("Loaded {} FAQ entries", faqs.len());

        if self.reload == CorpusReload::Cached {
            *self.cached.write().await = Some(Arc::clone(&faqs));
        }

        Ok(faqs)
    }

    /// Drop any cached snapshot so the next call re-reads the file.
    pub async fn invalidate(&self) {
        if self.cached.write().await.take().is_some() {
            tracing::info!("FAQ corpus cache invalidated");
        }
    }
}
