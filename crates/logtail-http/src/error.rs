//! Error types for the log data collaborator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid base url {url:?}: {detail}")]
    InvalidUrl { url: String, detail: String },

    #[error("http {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
