//! Chat session: ordered history and the Idle/Processing lifecycle.
//!
//! Transitions:
//! - Idle -> Processing (non-blank submission accepted)
//! - Processing -> Idle (reply settled, success or failure)

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use nyumba_core::types::FilterRecord;

use crate::assistant::Responder;
use crate::error::ChatError;
use crate::types::ChatMessage;

/// Appended when the responder fails unexpectedly.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Lifecycle of a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No reply pending. New submissions are accepted.
    Idle,
    /// One reply in flight. New submissions are rejected.
    Processing,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Processing => write!(f, "Processing"),
        }
    }
}

impl SessionState {
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Idle, SessionState::Processing)
                | (SessionState::Processing, SessionState::Idle)
        )
    }
}

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank utterance; nothing happened.
    Ignored,
    /// Another submission is still processing; nothing happened.
    Busy,
    /// One user and one assistant message were appended.
    Replied {
        message: ChatMessage,
        filters: Option<FilterRecord>,
    },
}

pub type FiltersCallback = Box<dyn Fn(&FilterRecord) + Send + Sync>;

/// Returns the session to Idle when dropped, including on cancellation.
///
/// A turn whose user message is recorded but whose reply never settled
/// gets [`ERROR_REPLY`], so history stays in user/assistant pairs.
struct ProcessingGuard<'a> {
    state: &'a Mutex<SessionState>,
    history: &'a Mutex<Vec<ChatMessage>>,
    awaiting_reply: bool,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        if self.awaiting_reply {
            warn!("Turn abandoned before a reply settled");
            self.history
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(ChatMessage::assistant(ERROR_REPLY));
        }
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        debug!("Session state: {} -> {}", *state, SessionState::Idle);
        *state = SessionState::Idle;
    }
}

/// One user's conversation with the assistant.
pub struct ChatSession {
    responder: Arc<dyn Responder>,
    state: Mutex<SessionState>,
    history: Mutex<Vec<ChatMessage>>,
    latest_filters: Mutex<Option<FilterRecord>>,
    on_filters: Option<FiltersCallback>,
    greeting: Option<String>,
}

impl ChatSession {
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self {
            responder,
            state: Mutex::new(SessionState::Idle),
            history: Mutex::new(Vec::new()),
            latest_filters: Mutex::new(None),
            on_filters: None,
            greeting: None,
        }
    }

    /// Welcome text shown before the first turn. Not part of the history.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Called with every non-empty filter record a turn produces.
    pub fn on_filters<F>(mut self, callback: F) -> Self
    where
        F: Fn(&FilterRecord) + Send + Sync + 'static,
    {
        self.on_filters = Some(Box::new(callback));
        self
    }

    pub fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the message history, oldest first.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Most recent non-empty filter record, if any turn produced one.
    pub fn latest_filters(&self) -> Option<FilterRecord> {
        self.latest_filters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Submit one user utterance.
    ///
    /// Blank input and submissions made while another is processing are
    /// no-ops. Otherwise exactly one user and one assistant message are
    /// appended; a failing responder yields [`ERROR_REPLY`].
    pub async fn submit(&self, utterance: &str) -> Result<SubmitOutcome, ChatError> {
        if utterance.trim().is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        let mut guard = match self.begin_processing()? {
            Some(guard) => guard,
            None => {
                debug!("Submission rejected: session is processing");
                return Ok(SubmitOutcome::Busy);
            }
        };

        self.lock_history()?.push(ChatMessage::user(utterance));
        guard.awaiting_reply = true;

        let (content, filters) = match self.responder.respond(utterance).await {
            Ok(reply) => (reply.response, reply.filters.filter(|f| !f.is_empty())),
            Err(e) => {
                warn!(error = %e, "Responder failed");
                (ERROR_REPLY.to_string(), None)
            }
        };

        let message = ChatMessage::assistant(content);
        self.lock_history()?.push(message.clone());
        guard.awaiting_reply = false;

        if let Some(ref filters) = filters {
            *self
                .latest_filters
                .lock()
                .map_err(|e| ChatError::StateError(format!("filters lock poisoned: {}", e)))? =
                Some(filters.clone());
            if let Some(ref callback) = self.on_filters {
                callback(filters);
            }
        }

        Ok(SubmitOutcome::Replied { message, filters })
    }

    /// Idle -> Processing. `None` if already processing.
    fn begin_processing(&self) -> Result<Option<ProcessingGuard<'_>>, ChatError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| ChatError::StateError(format!("state lock poisoned: {}", e)))?;
        if !state.can_transition_to(&SessionState::Processing) {
            return Ok(None);
        }
        debug!("Session state: {} -> {}", *state, SessionState::Processing);
        *state = SessionState::Processing;
        Ok(Some(ProcessingGuard {
            state: &self.state,
            history: &self.history,
            awaiting_reply: false,
        }))
    }

    fn lock_history(&self) -> Result<MutexGuard<'_, Vec<ChatMessage>>, ChatError> {
        self.history
            .lock()
            .map_err(|e| ChatError::StateError(format!("history lock poisoned: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::assistant::PropertyAssistant;
    use crate::types::{AssistantReply, MessageRole};

    struct BrokenResponder;

    #[async_trait]
    impl Responder for BrokenResponder {
        async fn respond(&self, _: &str) -> Result<AssistantReply, ChatError> {
            Err(ChatError::StateError("boom".into()))
        }
    }

    /// Blocks inside `respond` until released.
    struct GatedResponder {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl Responder for GatedResponder {
        async fn respond(&self, utterance: &str) -> Result<AssistantReply, ChatError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(AssistantReply {
                response: format!("done: {}", utterance),
                filters: None,
            })
        }
    }

    fn local_session() -> ChatSession {
        ChatSession::new(Arc::new(PropertyAssistant::local()))
    }

    // ---- SessionState ----

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Idle.to_string(), "Idle");
        assert_eq!(SessionState::Processing.to_string(), "Processing");
    }

    #[test]
    fn test_state_transitions() {
        assert!(SessionState::Idle.can_transition_to(&SessionState::Processing));
        assert!(SessionState::Processing.can_transition_to(&SessionState::Idle));
        assert!(!SessionState::Idle.can_transition_to(&SessionState::Idle));
        assert!(!SessionState::Processing.can_transition_to(&SessionState::Processing));
    }

    // ---- submit ----

    #[tokio::test]
    async fn test_new_session_is_idle_and_empty() {
        let session = local_session();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.history().is_empty());
        assert!(session.greeting().is_none());
        assert!(session.latest_filters().is_none());
    }

    #[tokio::test]
    async fn test_greeting_not_in_history() {
        let session = local_session().with_greeting("Hi!");
        assert_eq!(session.greeting(), Some("Hi!"));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_blank_submission_ignored() {
        let session = local_session();
        assert_eq!(session.submit("").await.unwrap(), SubmitOutcome::Ignored);
        assert_eq!(session.submit("   \n\t").await.unwrap(), SubmitOutcome::Ignored);
        assert!(session.history().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_submit_appends_user_then_assistant() {
        let session = local_session();
        let outcome = session.submit("2 bedroom in Karen").await.unwrap();

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].content, "2 bedroom in Karen");
        assert_eq!(history[1].role, MessageRole::Assistant);

        match outcome {
            SubmitOutcome::Replied { message, filters } => {
                assert_eq!(message, history[1]);
                let filters = filters.unwrap();
                assert_eq!(filters.bedrooms, Some(2));
                assert_eq!(filters.location.as_deref(), Some("Karen"));
            }
            other => panic!("expected Replied, got {:?}", other),
        }
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_history_is_two_per_submission() {
        let session = local_session();
        let inputs = ["hello", "2 bed in Nakuru", "how does this work", "ok"];
        for (i, input) in inputs.iter().enumerate() {
            session.submit(input).await.unwrap();
            assert_eq!(session.history().len(), 2 * (i + 1));
        }
        let roles: Vec<MessageRole> = session.history().iter().map(|m| m.role).collect();
        for (i, role) in roles.iter().enumerate() {
            let expected = if i % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            assert_eq!(*role, expected);
        }
    }

    #[tokio::test]
    async fn test_responder_error_becomes_apology() {
        let session = ChatSession::new(Arc::new(BrokenResponder));
        let outcome = session.submit("2 bed").await.unwrap();

        match outcome {
            SubmitOutcome::Replied { message, filters } => {
                assert_eq!(message.content, ERROR_REPLY);
                assert!(filters.is_none());
            }
            other => panic!("expected Replied, got {:?}", other),
        }
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_filters_callback_and_latest() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let session = local_session().on_filters(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        session.submit("hello").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(session.latest_filters().is_none());

        session.submit("bedsitter in Kasarani").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let latest = session.latest_filters().unwrap();
        assert_eq!(latest.property_type.as_deref(), Some("bedsitter"));

        // A turn without filters keeps the previous record.
        session.submit("ok").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.latest_filters(), Some(latest));
    }

    #[tokio::test]
    async fn test_concurrent_submission_is_rejected() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let session = Arc::new(ChatSession::new(Arc::new(GatedResponder {
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        })));

        let first_session = Arc::clone(&session);
        let first = tokio::spawn(async move { first_session.submit("first").await });

        entered.notified().await;
        assert_eq!(session.state(), SessionState::Processing);
        assert_eq!(session.history().len(), 1);

        let second = session.submit("second").await.unwrap();
        assert_eq!(second, SubmitOutcome::Busy);
        assert_eq!(session.history().len(), 1);

        release.notify_one();
        let outcome = first.await.unwrap().unwrap();
        match outcome {
            SubmitOutcome::Replied { message, .. } => assert_eq!(message.content, "done: first"),
            other => panic!("expected Replied, got {:?}", other),
        }
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.state(), SessionState::Idle);

        // Accepted again once idle.
        let entered_again = Arc::clone(&entered);
        let s = Arc::clone(&session);
        let third = tokio::spawn(async move { s.submit("third").await });
        entered_again.notified().await;
        release.notify_one();
        third.await.unwrap().unwrap();
        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn test_cancelled_submission_returns_to_idle() {
        let session = ChatSession::new(Arc::new(GatedResponder {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }));

        let result =
            tokio::time::timeout(std::time::Duration::from_millis(20), session.submit("stuck"))
                .await;
        assert!(result.is_err());
        assert_eq!(session.state(), SessionState::Idle);

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].content, "stuck");
        assert_eq!(history[1].role, MessageRole::Assistant);
        assert_eq!(history[1].content, ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_turn_after_cancellation_keeps_pairs() {
        let release = Arc::new(Notify::new());
        let session = ChatSession::new(Arc::new(GatedResponder {
            entered: Arc::new(Notify::new()),
            release: Arc::clone(&release),
        }));

        let abandoned =
            tokio::time::timeout(std::time::Duration::from_millis(20), session.submit("first"))
                .await;
        assert!(abandoned.is_err());

        release.notify_one();
        let outcome = session.submit("second").await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Replied { .. }));

        let history = session.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history.len() % 2, 0);
        let roles: Vec<MessageRole> = history.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            [
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant
            ]
        );
    }
}
