//! Error types for aivr-game
//!
//! Every variant ends up as visible round state; none escapes the session.

use thiserror::Error;

/// Main error type for image providers and the round controller
#[derive(Error, Debug)]
pub enum GameError {
    /// Network or transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body did not have the expected shape
    #[error("Malformed payload: {0}")]
    Payload(String),

    /// Base URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    Url(String),

    /// `select_next` called before a successful `prepare`
    #[error("Image source not prepared")]
    NotPrepared,

    /// Shared-library error (empty pool, bad manifest)
    #[error(transparent)]
    Common(#[from] aivr_common::Error),
}

/// Convenience Result type using GameError
pub type GameResult<T> = std::result::Result<T, GameError>;
