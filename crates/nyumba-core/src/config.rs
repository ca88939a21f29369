use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{NyumbaError, Result};

/// Top-level configuration for Nyumba.
///
/// Loaded from `~/.nyumba/config.toml` by default. Missing sections and
/// fields fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NyumbaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl NyumbaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NyumbaConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| NyumbaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the favorites database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.nyumba/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Chat session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Welcome text shown before the first turn.
    pub greeting: String,
    /// Whether the greeting is displayed at all.
    pub show_greeting: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: "Hi! I'm here to help you find the perfect rental property in Kenya. \
                       You can ask me about locations, price ranges, number of bedrooms, \
                       or specific amenities you're looking for."
                .to_string(),
            show_greeting: true,
        }
    }
}

/// Remote chat-completion service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Try the remote service before local synthesis.
    pub enabled: bool,
    /// Base URL of an OpenAI-compatible API, without the trailing path.
    pub base_url: String,
    /// API key. Takes priority over `api_key_env`.
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    pub api_key_env: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

impl AssistantConfig {
    /// Resolve the API key: explicit value first, then the environment.
    /// Blank keys count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file name, relative to `general.data_dir`.
    pub favorites_db: String,
    /// Key under which the favorites array is stored.
    pub favorites_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            favorites_db: "favorites.db".to_string(),
            favorites_key: "favorites".to_string(),
        }
    }
}
