//! Query session controller.
//!
//! `QuerySession` orchestrates one ask/answer cycle at a time: it
//! validates input, calls the remote Q&A client, builds the resulting
//! entry, and writes it to the history and selection repositories. Each
//! cycle moves Idle -> Asking -> Idle; the Asking state is observable
//! through [`QuerySession::is_asking`] and is always released, whichever
//! path the cycle takes.

use super::entry::QAEntry;
use super::repository::{HistoryRepository, SelectionRepository};
use crate::client::QaClient;
use crate::department::Department;
use crate::error::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// The observable result of an [`QuerySession::ask`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    /// A cycle completed and produced this entry (success or recovered
    /// failure); it has been appended to history and selected.
    Answered(QAEntry),
    /// The question was blank after trimming; nothing happened.
    Ignored,
    /// Another ask was already in flight; this call was rejected.
    Busy,
}

/// Clears the asking flag when the cycle ends, on every exit path.
struct AskingGuard<'a>(&'a AtomicBool);

impl Drop for AskingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Orchestrates the ask/answer cycle against the remote Q&A service.
///
/// Overlapping asks are rejected rather than queued: a second `ask`
/// issued while one is in flight returns [`AskOutcome::Busy`] without
/// touching the network or any state.
pub struct QuerySession {
    history: Arc<dyn HistoryRepository>,
    selection: Arc<dyn SelectionRepository>,
    client: Arc<dyn QaClient>,
    asking: AtomicBool,
}

impl QuerySession {
    /// Creates a new session over the given repositories and client.
    pub fn new(
        history: Arc<dyn HistoryRepository>,
        selection: Arc<dyn SelectionRepository>,
        client: Arc<dyn QaClient>,
    ) -> Self {
        Self {
            history,
            selection,
            client,
            asking: AtomicBool::new(false),
        }
    }

    /// Returns true while an ask cycle is in flight.
    pub fn is_asking(&self) -> bool {
        self.asking.load(Ordering::SeqCst)
    }

    /// Asks the remote service a department-scoped question.
    ///
    /// The question and the department are captured by value at call
    /// time, so the recorded entry reflects the input at submission even
    /// if the caller's input fields change while the request is
    /// outstanding. The question is sent and recorded exactly as given;
    /// trimming happens only for the blank-input guard.
    ///
    /// A transport or parse failure is recovered into an error-annotated
    /// entry and recorded exactly like a success; only a persistence
    /// failure surfaces as `Err`.
    pub async fn ask(&self, question: &str, department: Department) -> Result<AskOutcome> {
        if question.trim().is_empty() {
            return Ok(AskOutcome::Ignored);
        }

        if self
            .asking
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("ask rejected: another ask is in flight");
            return Ok(AskOutcome::Busy);
        }
        let _guard = AskingGuard(&self.asking);

        let question = question.to_string();
        let entry = match self.client.ask(&question, department).await {
            Ok(reply) => QAEntry::from_answer(question, reply.answer),
            Err(error) => {
                tracing::warn!("ask failed, recording error entry: {error}");
                QAEntry::from_failure(question, &error)
            }
        };

        self.history.append(&entry).await?;
        self.selection.set(&entry).await?;

        Ok(AskOutcome::Answered(entry))
    }

    /// Returns a snapshot of the conversation history.
    pub async fn history(&self) -> Vec<QAEntry> {
        self.history.all().await
    }

    /// Returns the currently displayed entry, if any.
    pub async fn selection(&self) -> Option<QAEntry> {
        self.selection.get().await
    }

    /// Copies a past entry into the selection without touching history.
    pub async fn select_from_history(&self, entry: &QAEntry) -> Result<()> {
        self.selection.set(entry).await
    }

    /// Deletes the entry at `index` from history.
    ///
    /// When the removed entry equals the current selection by value, the
    /// selection is cleared as a cascading effect.
    ///
    /// # Returns
    ///
    /// - `Ok(QAEntry)`: The removed entry
    /// - `Err(BotError::IndexOutOfRange)`: `index` is not a valid position
    pub async fn delete_from_history(&self, index: usize) -> Result<QAEntry> {
        let removed = self.history.delete_at(index).await?;
        if self.selection.get().await.as_ref() == Some(&removed) {
            self.selection.clear().await?;
        }
        Ok(removed)
    }

    /// Clears the selection ("ask another"); history is untouched.
    pub async fn dismiss_selection(&self) -> Result<()> {
        self.selection.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::QaReply;
    use crate::error::BotError;
    use crate::session::entry::NO_RESPONSE_FALLBACK;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    // In-memory repository doubles for testing

    #[derive(Default)]
    struct MemoryHistory {
        entries: Mutex<Vec<QAEntry>>,
    }

    #[async_trait]
    impl HistoryRepository for MemoryHistory {
        async fn all(&self) -> Vec<QAEntry> {
            self.entries.lock().unwrap().clone()
        }

        async fn append(&self, entry: &QAEntry) -> Result<()> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn delete_at(&self, index: usize) -> Result<QAEntry> {
            let mut entries = self.entries.lock().unwrap();
            if index >= entries.len() {
                return Err(BotError::index_out_of_range(index, entries.len()));
            }
            Ok(entries.remove(index))
        }
    }

    #[derive(Default)]
    struct MemorySelection {
        current: Mutex<Option<QAEntry>>,
    }

    #[async_trait]
    impl SelectionRepository for MemorySelection {
        async fn get(&self) -> Option<QAEntry> {
            self.current.lock().unwrap().clone()
        }

        async fn set(&self, entry: &QAEntry) -> Result<()> {
            *self.current.lock().unwrap() = Some(entry.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.current.lock().unwrap() = None;
            Ok(())
        }
    }

    // Scripted client double

    enum Reply {
        Answer(Option<String>),
        Failure(String),
    }

    struct ScriptedClient {
        reply: Reply,
        calls: AtomicUsize,
        last_question: Mutex<Option<String>>,
    }

    impl ScriptedClient {
        fn answering(answer: &str) -> Self {
            Self {
                reply: Reply::Answer(Some(answer.to_string())),
                calls: AtomicUsize::new(0),
                last_question: Mutex::new(None),
            }
        }

        fn empty() -> Self {
            Self {
                reply: Reply::Answer(None),
                calls: AtomicUsize::new(0),
                last_question: Mutex::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Reply::Failure(message.to_string()),
                calls: AtomicUsize::new(0),
                last_question: Mutex::new(None),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_question(&self) -> Option<String> {
            self.last_question.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QaClient for ScriptedClient {
        async fn ask(&self, question: &str, _department: Department) -> Result<QaReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_question.lock().unwrap() = Some(question.to_string());
            match &self.reply {
                Reply::Answer(answer) => Ok(QaReply {
                    answer: answer.clone(),
                }),
                Reply::Failure(message) => Err(BotError::transport(message.clone())),
            }
        }
    }

    fn session_with(client: Arc<dyn QaClient>) -> QuerySession {
        QuerySession::new(
            Arc::new(MemoryHistory::default()),
            Arc::new(MemorySelection::default()),
            client,
        )
    }

    #[tokio::test]
    async fn test_ask_appends_and_selects() {
        let session = session_with(Arc::new(ScriptedClient::answering("42")));

        let outcome = session.ask("meaning of life", Department::Cse).await.unwrap();

        let expected = QAEntry::new("meaning of life", "42");
        assert_eq!(outcome, AskOutcome::Answered(expected.clone()));
        assert_eq!(session.history().await, vec![expected.clone()]);
        assert_eq!(session.selection().await, Some(expected));
        assert!(!session.is_asking());
    }

    #[tokio::test]
    async fn test_ask_keeps_exact_question_text() {
        let client = Arc::new(ScriptedClient::answering("a"));
        let session = session_with(client.clone());

        session.ask("  padded  ", Department::It).await.unwrap();

        // Surrounding whitespace only matters for the blank-input guard;
        // the question is sent and recorded exactly as submitted.
        assert_eq!(client.last_question().as_deref(), Some("  padded  "));
        assert_eq!(session.history().await[0].question, "  padded  ");
    }

    #[tokio::test]
    async fn test_blank_question_is_a_no_op() {
        let client = Arc::new(ScriptedClient::answering("unused"));
        let session = session_with(client.clone());

        let outcome = session.ask("   ", Department::Mech).await.unwrap();

        assert_eq!(outcome, AskOutcome::Ignored);
        assert!(session.history().await.is_empty());
        assert_eq!(session.selection().await, None);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_answer_uses_fallback() {
        let session = session_with(Arc::new(ScriptedClient::empty()));

        session.ask("anything", Department::Civil).await.unwrap();

        assert_eq!(session.history().await[0].answer, NO_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn test_failure_is_recorded_as_entry() {
        let session = session_with(Arc::new(ScriptedClient::failing("timed out")));

        let outcome = session.ask("q", Department::Cse).await.unwrap();

        let AskOutcome::Answered(entry) = outcome else {
            panic!("expected an answered outcome");
        };
        assert_eq!(entry.answer, "Error: Transport error: timed out");
        assert_eq!(session.history().await.len(), 1);
        assert_eq!(session.selection().await, Some(entry));
        assert!(!session.is_asking());
    }

    #[tokio::test]
    async fn test_select_from_history_copies_entry() {
        let session = session_with(Arc::new(ScriptedClient::answering("a1")));
        session.ask("q1", Department::Cse).await.unwrap();
        session.dismiss_selection().await.unwrap();

        let past = session.history().await[0].clone();
        session.select_from_history(&past).await.unwrap();

        assert_eq!(session.selection().await, Some(past));
        assert_eq!(session.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_clear_on_matching_selection() {
        let session = session_with(Arc::new(ScriptedClient::answering("a")));
        session.ask("q1", Department::Cse).await.unwrap();
        session.ask("q2", Department::Cse).await.unwrap();

        // q2 is selected; deleting it clears the selection
        let removed = session.delete_from_history(1).await.unwrap();
        assert_eq!(removed.question, "q2");
        assert_eq!(session.selection().await, None);
        assert_eq!(session.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_leaves_unrelated_selection() {
        let session = session_with(Arc::new(ScriptedClient::answering("a")));
        session.ask("q1", Department::Cse).await.unwrap();
        session.ask("q2", Department::Cse).await.unwrap();

        let removed = session.delete_from_history(0).await.unwrap();
        assert_eq!(removed.question, "q1");
        assert_eq!(
            session.selection().await.map(|e| e.question),
            Some("q2".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_out_of_range_surfaces_error() {
        let session = session_with(Arc::new(ScriptedClient::answering("a")));

        let err = session.delete_from_history(0).await.unwrap_err();
        assert!(err.is_index_out_of_range());
    }

    #[tokio::test]
    async fn test_dismiss_clears_selection_only() {
        let session = session_with(Arc::new(ScriptedClient::answering("a")));
        session.ask("q", Department::Cse).await.unwrap();

        session.dismiss_selection().await.unwrap();

        assert_eq!(session.selection().await, None);
        assert_eq!(session.history().await.len(), 1);
    }

    // Client that parks until released, to hold a cycle in the Asking state.
    struct BlockingClient {
        release: Notify,
    }

    #[async_trait]
    impl QaClient for BlockingClient {
        async fn ask(&self, _question: &str, _department: Department) -> Result<QaReply> {
            self.release.notified().await;
            Ok(QaReply {
                answer: Some("late answer".to_string()),
            })
        }
    }

    #[tokio::test]
    async fn test_overlapping_ask_is_rejected() {
        let client = Arc::new(BlockingClient {
            release: Notify::new(),
        });
        let session = Arc::new(QuerySession::new(
            Arc::new(MemoryHistory::default()),
            Arc::new(MemorySelection::default()),
            client.clone(),
        ));

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.ask("first", Department::Cse).await })
        };
        // Let the first ask reach the client and park there.
        while !session.is_asking() {
            tokio::task::yield_now().await;
        }

        let second = session.ask("second", Department::Cse).await.unwrap();
        assert_eq!(second, AskOutcome::Busy);

        client.release.notify_one();
        let first = first.await.unwrap().unwrap();
        assert!(matches!(first, AskOutcome::Answered(_)));

        // Only the first ask produced an entry.
        assert_eq!(session.history().await.len(), 1);
        assert_eq!(session.history().await[0].question, "first");
        assert!(!session.is_asking());
    }
}
