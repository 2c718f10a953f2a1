//! Error types for the Crawlboard client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to a Crawlboard server
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got a response
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Missing or malformed bearer token (401)
    #[error("Unauthorized: check the bearer token ({0})")]
    Unauthorized(String),

    /// Unknown or malformed job id (404)
    #[error("Job not found: {0}")]
    NotFound(String),

    /// Server refused the input: bad URL, action, body or query (other 4xx)
    #[error("Rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Server-side failure (5xx)
    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Classify a failed response by its status code
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            500..=u16::MAX => Self::Server { status, message },
            _ => Self::Rejected { status, message },
        }
    }

    /// HTTP status behind the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::Rejected { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            Self::ParseError(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
