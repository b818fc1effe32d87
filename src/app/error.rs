use thiserror::Error;

use super::draft::FieldKey;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed update for {key}: {reason}")]
    MalformedUpdate { key: FieldKey, reason: String },

    #[error("Unknown option {value:?} for {key}")]
    UnknownOption { key: FieldKey, value: String },

    #[error("Config error: {0}")]
    Config(String),
}

/// Convenience type alias for Results with PanelError
pub type Result<T> = std::result::Result<T, PanelError>;
