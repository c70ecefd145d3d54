//! Session state engine: entries, repositories, and the controller.

pub mod controller;
pub mod entry;
pub mod repository;

pub use controller::{AskOutcome, QuerySession};
pub use entry::{NO_RESPONSE_FALLBACK, QAEntry};
pub use repository::{HistoryRepository, SelectionRepository};
