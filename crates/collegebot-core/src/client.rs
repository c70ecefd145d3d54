//! Remote Q&A client trait.
//!
//! The remote service is an opaque external collaborator reachable only
//! through this request/response contract. The concrete HTTP agent lives
//! in `collegebot-interaction`; tests substitute their own doubles.

use crate::department::Department;
use crate::error::Result;
use async_trait::async_trait;

/// The raw reply from the remote Q&A service.
///
/// `answer` is `None` when the response carried no usable answer field;
/// the caller decides what to substitute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaReply {
    pub answer: Option<String>,
}

/// An abstract client for the remote Q&A service.
#[async_trait]
pub trait QaClient: Send + Sync {
    /// Asks the remote service a department-scoped question.
    ///
    /// # Returns
    ///
    /// - `Ok(QaReply)`: The service responded (possibly without an answer)
    /// - `Err(BotError::Transport)`: Network, status, or parse failure
    async fn ask(&self, question: &str, department: Department) -> Result<QaReply>;
}
