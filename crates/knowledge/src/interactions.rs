//! Append-only interaction log (JSON Lines).
//!
//! One record per answered question. Records are never read back, rewritten,
//! or truncated. Appends within a process are serialized and each record goes
//! out as a single write, so lines never interleave.

use crate::types::Interaction;
use faqbot_core::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug)]
pub struct InteractionLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl InteractionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the log directory if needed.
    pub async fn append(&self, interaction: &Interaction) -> AppResult<()> {
        let mut line = serde_json::to_string(interaction)
            .map_err(|e| AppError::LoggingFailed(format!("failed to serialize record: {}", e)))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                AppError::LoggingFailed(format!("failed to create {:?}: {}", dir, e))
            })?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                AppError::LoggingFailed(format!("failed to open {:?}: {}", self.path, e))
            })?;

        file.write_all(line.as_bytes()).await.map_err(|e| {
            AppError::LoggingFailed(format!("failed to write {:?}: {}", self.path, e))
        })?;
        file.flush().await.map_err(|e| {
            AppError::LoggingFailed(format!("failed to flush {:?}: {}", self.path, e))
        })?;

        Ok(())
    }

    /// Append one record; failures are reported and swallowed.
    pub async fn record(&self, interaction: &Interaction) {
        match self.append(interaction).await {
            Ok(()) => tracing::debug!("Logged interaction to {:?}", self.path),
            Err(e) => tracing::error!("Error logging interaction: {}", e),
        }
    }
}
