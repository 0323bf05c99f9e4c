//! Error types for Translit QA

use thiserror::Error;

/// Result type alias using the Translit Error
pub type Result<T> = std::result::Result<T, Error>;

/// Translit error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Results artifact not found at {0}")]
    ResultsMissing(String),

    #[error("Malformed results artifact {path}: {reason}")]
    MalformedResults { path: String, reason: String },

    #[error("Malformed static test data {path}: {reason}")]
    MalformedStaticData { path: String, reason: String },
}
