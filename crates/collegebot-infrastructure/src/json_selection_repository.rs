//! JSON file-backed selection repository.

use crate::atomic_json::AtomicJsonFile;
use crate::paths::BotPaths;
use async_trait::async_trait;
use collegebot_core::error::{BotError, Result};
use collegebot_core::session::{QAEntry, SelectionRepository};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Persists the currently displayed entry as a single JSON object.
///
/// The selection's backing file exists only while a selection is set:
/// clearing removes the file rather than writing a null sentinel. Loading
/// mirrors the history repository's graceful fallback on malformed data.
pub struct JsonSelectionRepository {
    current: Mutex<Option<QAEntry>>,
    storage: AtomicJsonFile<QAEntry>,
}

impl JsonSelectionRepository {
    /// Opens the repository backed by the given file path.
    pub fn open(path: PathBuf) -> Self {
        let storage = AtomicJsonFile::new(path);
        let current = match storage.load() {
            Ok(current) => current,
            Err(error) => {
                tracing::warn!(
                    "Discarding malformed selection at {:?}: {}",
                    storage.path(),
                    error
                );
                None
            }
        };
        Self {
            current: Mutex::new(current),
            storage,
        }
    }

    /// Opens the repository at the default platform data path.
    pub fn new_default() -> Result<Self> {
        let path = BotPaths::selection_file().map_err(|e| BotError::config(e.to_string()))?;
        Ok(Self::open(path))
    }
}

#[async_trait]
impl SelectionRepository for JsonSelectionRepository {
    async fn get(&self) -> Option<QAEntry> {
        self.current.lock().await.clone()
    }

    async fn set(&self, entry: &QAEntry) -> Result<()> {
        let mut current = self.current.lock().await;
        self.storage.save(entry)?;
        *current = Some(entry.clone());
        tracing::debug!("Selection set to question {:?}", entry.question);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut current = self.current.lock().await;
        self.storage.remove()?;
        *current = None;
        tracing::debug!("Selection cleared");
        Ok(())
    }
}
