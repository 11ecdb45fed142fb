use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Audio output unavailable: {0}")]
    OutputUnavailable(String),

    #[error("Failed to spawn audio thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    #[error("Cannot open file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    HttpStatus(u16),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, PlayerError>;
