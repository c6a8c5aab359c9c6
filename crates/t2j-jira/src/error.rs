//! Error model for Jira API operations.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JiraError>;

/// Failure modes of Jira API interactions: HTTP errors with their status,
/// authentication rejections, timeouts, network problems, and undecodable
/// responses.
#[derive(Debug, Error)]
pub enum JiraError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("http {status}: {message}")]
    Http { status: StatusCode, message: String },
    #[error("authentication error: {0}")]
    Authentication(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("unexpected error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for JiraError {
    /// Classifies reqwest failures into semantic variants.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_connect() {
            Self::Network(err.to_string())
        } else if err.is_status() {
            let status = err.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Self::Http {
                status,
                message: err.to_string(),
            }
        } else {
            Self::Other(err.to_string())
        }
    }
}
