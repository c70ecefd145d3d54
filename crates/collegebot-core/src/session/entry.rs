//! Question/answer entry types.
//!
//! A `QAEntry` records one completed ask cycle. It is immutable once
//! created and is produced only by the session controller, either from a
//! successful response or from a recovered failure.

use crate::error::BotError;
use serde::{Deserialize, Serialize};

/// Substituted when the remote service returns no usable answer.
pub const NO_RESPONSE_FALLBACK: &str = "No response received.";

/// An immutable question/answer pair recorded from one ask cycle.
///
/// Entries are compared by value: the same question asked twice produces
/// two structurally equal but independently stored entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAEntry {
    /// The question exactly as captured at submission time.
    pub question: String,
    /// The resolved answer text, or an error annotation on failure.
    pub answer: String,
}

impl QAEntry {
    /// Creates an entry from a question and a resolved answer.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Creates an entry from the remote service's optional answer payload.
    ///
    /// An absent or empty answer is replaced with [`NO_RESPONSE_FALLBACK`].
    pub fn from_answer(question: impl Into<String>, answer: Option<String>) -> Self {
        let answer = match answer {
            Some(a) if !a.is_empty() => a,
            _ => NO_RESPONSE_FALLBACK.to_string(),
        };
        Self::new(question, answer)
    }

    /// Creates an entry recording a failed ask cycle.
    ///
    /// Failures are recorded as ordinary conversation turns whose answer
    /// carries the failure description, never raised to the caller.
    pub fn from_failure(question: impl Into<String>, error: &BotError) -> Self {
        Self::new(question, format!("Error: {error}"))
    }
}
