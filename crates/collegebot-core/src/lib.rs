//! Core domain layer for CollegeBot.
//!
//! This crate holds the session state engine (history, selection, and the
//! query session controller), the department qualifier, the remote client
//! contract, and the answer sanitizer. It performs no I/O of its own:
//! persistence and transport are abstracted behind the
//! [`session::HistoryRepository`], [`session::SelectionRepository`], and
//! [`client::QaClient`] traits.

pub mod client;
pub mod department;
pub mod error;
pub mod sanitize;
pub mod session;

// Re-export common types
pub use client::{QaClient, QaReply};
pub use department::Department;
pub use error::{BotError, Result};
pub use session::{AskOutcome, QAEntry, QuerySession};
