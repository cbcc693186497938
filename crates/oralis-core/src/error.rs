use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("section number out of range: {0}")]
    InvalidSection(u8),

    #[error("unknown driver: {0}")]
    UnknownDriver(String),

    #[error("unknown tone: {0}")]
    UnknownTone(String),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}
