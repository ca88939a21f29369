use thiserror::Error;

/// Top-level error type for Nyumba.
///
/// Subsystem crates define their own error types and convert from
/// `NyumbaError` so `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NyumbaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Remote service error: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for NyumbaError {
    fn from(err: toml::de::Error) -> Self {
        NyumbaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for NyumbaError {
    fn from(err: toml::ser::Error) -> Self {
        NyumbaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for NyumbaError {
    fn from(err: serde_json::Error) -> Self {
        NyumbaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Nyumba operations.
pub type Result<T> = std::result::Result<T, NyumbaError>;
