//! History and selection repository traits.
//!
//! These traits define the persistence contract for the conversation
//! history and the currently displayed selection, decoupling the session
//! controller from the specific storage mechanism (e.g. JSON files, a
//! database, in-memory test doubles).
//!
//! Implementations load their persisted state when constructed and must
//! fall back to an empty default when the stored data is absent or
//! malformed; the loading path is never allowed to fail the process.

use super::entry::QAEntry;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the ordered conversation history.
///
/// The history is append-only except for explicit index-addressed
/// deletion. Every mutating method persists the full updated sequence
/// before returning, so a read that follows a completed mutation always
/// observes the new state.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Returns a snapshot of all entries in chronological order.
    async fn all(&self) -> Vec<QAEntry>;

    /// Appends an entry to the end of the history and persists it.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Entry appended and persisted
    /// - `Err(_)`: Persistence failed (the in-memory state is unchanged)
    async fn append(&self, entry: &QAEntry) -> Result<()>;

    /// Removes and returns the entry at the given position.
    ///
    /// Subsequent entries shift down by one position; the updated
    /// sequence is persisted before returning.
    ///
    /// # Returns
    ///
    /// - `Ok(QAEntry)`: The removed entry
    /// - `Err(BotError::IndexOutOfRange)`: `index` is not a valid position
    /// - `Err(_)`: Persistence failed
    async fn delete_at(&self, index: usize) -> Result<QAEntry>;
}

/// An abstract repository for the single currently displayed entry.
///
/// The selection has a lifecycle independent of the history: it holds an
/// entry by value, so deleting the source entry from history does not
/// invalidate it structurally (the controller cascades the clear).
#[async_trait]
pub trait SelectionRepository: Send + Sync {
    /// Returns the current selection, if any.
    async fn get(&self) -> Option<QAEntry>;

    /// Replaces the current selection and persists it.
    async fn set(&self, entry: &QAEntry) -> Result<()>;

    /// Clears the selection and removes the persisted record entirely.
    ///
    /// No "null" sentinel is written; after a clear, the backing store
    /// holds no selection record at all.
    async fn clear(&self) -> Result<()>;
}
