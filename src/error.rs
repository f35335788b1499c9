// Error types for revoguide.
// Covers GitHub API failures, static content problems, and shell region lookups.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Malformed content in {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Shell has no region with id `{0}`")]
    MissingRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GuideError>;
