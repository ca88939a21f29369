//! Conversational property search for Nyumba.
//!
//! Extracts structured search filters from free text, composes replies
//! locally or through a remote chat-completion service, and manages chat
//! sessions.

pub mod assistant;
pub mod error;
pub mod extract;
pub mod remote;
pub mod response;
pub mod session;
pub mod smart_search;
pub mod types;
pub mod vocabulary;

pub use assistant::{PropertyAssistant, Responder};
pub use error::ChatError;
pub use extract::{FilterExtractor, PriceRange};
pub use remote::{ChatCompletion, OpenAiClient, NO_CONTENT_REPLY};
pub use response::{CannedReply, ResponseSynthesizer};
pub use session::{ChatSession, FiltersCallback, SessionState, SubmitOutcome, ERROR_REPLY};
pub use smart_search::SmartSearch;
pub use types::{AssistantReply, ChatMessage, MessageRole};
pub use vocabulary::{system_prompt, VocabularyEntry};
