//! Property assistant: local extraction plus remote or local reply.
//!
//! Filters are always computed locally. The reply text comes from the
//! remote chat-completion service when one is configured and answers,
//! otherwise from [`ResponseSynthesizer`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use nyumba_core::config::AssistantConfig;

use crate::error::ChatError;
use crate::extract::FilterExtractor;
use crate::remote::{ChatCompletion, OpenAiClient};
use crate::response::ResponseSynthesizer;
use crate::types::AssistantReply;
use crate::vocabulary::system_prompt;

/// Produces one reply per utterance. Driven by [`crate::ChatSession`].
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, utterance: &str) -> Result<AssistantReply, ChatError>;
}

pub struct PropertyAssistant {
    extractor: FilterExtractor,
    synthesizer: ResponseSynthesizer,
    remote: Option<Arc<dyn ChatCompletion>>,
    system_prompt: String,
}

impl PropertyAssistant {
    /// Assistant that never leaves the process.
    pub fn local() -> Self {
        Self {
            extractor: FilterExtractor::new(),
            synthesizer: ResponseSynthesizer::new(),
            remote: None,
            system_prompt: system_prompt(),
        }
    }

    /// Assistant that asks `remote` first and falls back locally.
    pub fn with_remote(remote: Arc<dyn ChatCompletion>) -> Self {
        Self {
            remote: Some(remote),
            ..Self::local()
        }
    }

    /// Build from the `[assistant]` section. A disabled section or a
    /// missing API key yields a local-only assistant.
    pub fn from_config(config: &AssistantConfig) -> Self {
        if !config.enabled {
            return Self::local();
        }
        match OpenAiClient::from_config(config) {
            Ok(client) => {
                info!(endpoint = client.endpoint(), model = %config.model, "Remote assistant enabled");
                Self::with_remote(Arc::new(client))
            }
            Err(e) => {
                warn!(error = %e, "Remote assistant unavailable, using local replies");
                Self::local()
            }
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn extractor(&self) -> &FilterExtractor {
        &self.extractor
    }

    /// Reply to one utterance. Remote failures are logged and replaced by
    /// the local synthesizer; this never fails.
    pub async fn reply(&self, utterance: &str) -> AssistantReply {
        let filters = self.extractor.extract(utterance);

        let response = match self.remote {
            Some(ref remote) => match remote.complete(&self.system_prompt, utterance).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Remote completion failed, falling back to local reply");
                    self.synthesizer.synthesize(&filters, utterance)
                }
            },
            None => self.synthesizer.synthesize(&filters, utterance),
        };

        AssistantReply {
            response,
            filters: (!filters.is_empty()).then_some(filters),
        }
    }
}

impl Default for PropertyAssistant {
    fn default() -> Self {
        Self::local()
    }
}

#[async_trait]
impl Responder for PropertyAssistant {
    async fn respond(&self, utterance: &str) -> Result<AssistantReply, ChatError> {
        Ok(self.reply(utterance).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::response::{GENERIC_RESPONSE, GREETING_RESPONSE};

    struct FixedCompletion {
        text: String,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl FixedCompletion {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ChatCompletion for FixedCompletion {
        async fn complete(&self, system_prompt: &str, _utterance: &str) -> Result<String, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(system_prompt.to_string());
            Ok(self.text.clone())
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl ChatCompletion for FailingCompletion {
        async fn complete(&self, _: &str, _: &str) -> Result<String, ChatError> {
            Err(ChatError::RemoteStatus {
                status: 503,
                body: "overloaded".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_local_reply_with_filters() {
        let assistant = PropertyAssistant::local();
        let reply = assistant.reply("studio in Kilimani under 30k").await;

        let filters = reply.filters.unwrap();
        assert_eq!(filters.location.as_deref(), Some("Kilimani"));
        assert_eq!(filters.property_type.as_deref(), Some("studio"));
        assert_eq!(filters.max_price, Some(30000));
        assert!(reply.response.starts_with("Great! I've updated your search filters"));
        assert!(reply.response.contains("Looking for studios. "));
    }

    #[tokio::test]
    async fn test_local_reply_without_filters() {
        let assistant = PropertyAssistant::local();
        let reply = assistant.reply("hello").await;
        assert_eq!(reply.response, GREETING_RESPONSE);
        assert!(reply.filters.is_none());
    }

    #[tokio::test]
    async fn test_remote_reply_used_and_filters_still_local() {
        let remote = Arc::new(FixedCompletion::new("Karibu! Here are 2 bedroom homes."));
        let assistant = PropertyAssistant::with_remote(remote.clone());

        let reply = assistant.reply("2 bedroom in Westlands").await;
        assert_eq!(reply.response, "Karibu! Here are 2 bedroom homes.");
        let filters = reply.filters.unwrap();
        assert_eq!(filters.bedrooms, Some(2));
        assert_eq!(filters.location.as_deref(), Some("Westlands"));

        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
        let prompt = remote.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Available locations"));
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_locally() {
        let assistant = PropertyAssistant::with_remote(Arc::new(FailingCompletion));
        let reply = assistant.reply("got any places?").await;
        assert_eq!(reply.response, GENERIC_RESPONSE);
        assert!(reply.filters.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_remote_falls_back_locally() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = OpenAiClient::new(&format!("http://127.0.0.1:{}/v1", port), "k", "m")
            .with_http_client(reqwest::Client::builder().no_proxy().build().unwrap());
        let assistant = PropertyAssistant::with_remote(Arc::new(client));

        let reply = assistant.reply("3 bed in Karen").await;
        assert!(reply.response.contains("Looking for properties in Karen. "));
        assert!(reply.response.contains("3 bedrooms. "));
    }

    #[test]
    fn test_from_config_disabled_is_local() {
        let assistant = PropertyAssistant::from_config(&AssistantConfig::default());
        assert!(!assistant.has_remote());
    }

    #[test]
    fn test_from_config_without_key_is_local() {
        let config = AssistantConfig {
            enabled: true,
            api_key: None,
            api_key_env: "NYUMBA_TEST_KEY_DEFINITELY_UNSET".into(),
            ..Default::default()
        };
        assert!(!PropertyAssistant::from_config(&config).has_remote());
    }

    #[test]
    fn test_from_config_with_key_is_remote() {
        let config = AssistantConfig {
            enabled: true,
            api_key: Some("sk-test".into()),
            ..Default::default()
        };
        assert!(PropertyAssistant::from_config(&config).has_remote());
    }

    #[tokio::test]
    async fn test_responder_impl_never_errors() {
        let assistant = PropertyAssistant::with_remote(Arc::new(FailingCompletion));
        let reply = Responder::respond(&assistant, "help").await;
        assert!(reply.is_ok());
    }
}
