//! Error types for the chat engine.

use nyumba_core::error::NyumbaError;

/// Errors from the chat engine.
///
/// Remote variants are recovered by the assistant's local fallback and
/// never reach the user.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("no API key configured for the remote assistant")]
    MissingApiKey,
    #[error("remote service unavailable: {0}")]
    RemoteUnavailable(String),
    #[error("remote service returned status {status}: {body}")]
    RemoteStatus { status: u16, body: String },
    #[error("malformed remote response: {0}")]
    MalformedResponse(String),
    #[error("session state error: {0}")]
    StateError(String),
    #[error("core error: {0}")]
    Core(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChatError::MalformedResponse(err.to_string())
        } else {
            ChatError::RemoteUnavailable(err.to_string())
        }
    }
}

impl From<NyumbaError> for ChatError {
    fn from(err: NyumbaError) -> Self {
        ChatError::Core(err.to_string())
    }
}
