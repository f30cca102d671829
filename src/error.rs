// Error types for the postdeck application.
// Covers transport failures, HTTP status errors, decode errors, and terminal IO.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostdeckError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PostdeckError>;
