//! Common error types for AI vs Real

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Label;

/// Common result type for AI vs Real operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the server, generator and clients
#[derive(Error, Debug)]
pub enum Error {
    /// One of the label pools has no images
    #[error("Image pool for '{0}' is empty")]
    EmptyPool(Label),

    /// None of the candidate directories exists
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON document (manifest or API payload)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML configuration file
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request path that cannot be decoded or resolved
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Label string other than "human" or "ai"
    #[error("Invalid label: {0}")]
    InvalidLabel(String),
}
