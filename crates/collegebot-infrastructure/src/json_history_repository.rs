//! JSON file-backed history repository.

use crate::atomic_json::AtomicJsonFile;
use crate::paths::BotPaths;
use async_trait::async_trait;
use collegebot_core::error::{BotError, Result};
use collegebot_core::session::{HistoryRepository, QAEntry};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Persists the conversation history as a JSON array in a single file.
///
/// The full sequence is held in memory and rewritten to disk on every
/// mutation, before the mutating call returns. The persisted file is
/// loaded once at construction; absent or malformed data falls back to an
/// empty history so a damaged file can never take the session down.
pub struct JsonHistoryRepository {
    entries: Mutex<Vec<QAEntry>>,
    storage: AtomicJsonFile<Vec<QAEntry>>,
}

impl JsonHistoryRepository {
    /// Opens the repository backed by the given file path.
    pub fn open(path: PathBuf) -> Self {
        let storage = AtomicJsonFile::new(path);
        let entries = match storage.load() {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(
                    "Discarding malformed history at {:?}: {}",
                    storage.path(),
                    error
                );
                Vec::new()
            }
        };
        tracing::debug!("Loaded {} history entries", entries.len());
        Self {
            entries: Mutex::new(entries),
            storage,
        }
    }

    /// Opens the repository at the default platform data path.
    pub fn new_default() -> Result<Self> {
        let path = BotPaths::history_file().map_err(|e| BotError::config(e.to_string()))?;
        Ok(Self::open(path))
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn all(&self) -> Vec<QAEntry> {
        self.entries.lock().await.clone()
    }

    async fn append(&self, entry: &QAEntry) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.push(entry.clone());
        if let Err(error) = self.storage.save(&entries) {
            // Keep memory and disk consistent when the write fails.
            entries.pop();
            return Err(error);
        }
        tracing::debug!("Appended history entry ({} total)", entries.len());
        Ok(())
    }

    async fn delete_at(&self, index: usize) -> Result<QAEntry> {
        let mut entries = self.entries.lock().await;
        if index >= entries.len() {
            return Err(BotError::index_out_of_range(index, entries.len()));
        }
        let removed = entries.remove(index);
        if let Err(error) = self.storage.save(&entries) {
            entries.insert(index, removed);
            return Err(error);
        }
        tracing::debug!("Deleted history entry at {} ({} remain)", index, entries.len());
        Ok(removed)
    }
}
