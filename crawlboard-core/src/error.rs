//! Error types shared by every Crawlboard component

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Rejections surfaced to whoever issued an operation
///
/// Inapplicable lifecycle transitions are not errors; see
/// [`crate::domain::lifecycle::Outcome::NoOp`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlError {
    /// Blank submission, rejected before URL validation
    #[error("URL is required")]
    EmptyUrl,

    /// Submission that does not parse as an absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Action or delete referencing an id that is not in the collection
    #[error("Result {0} not found")]
    NotFound(Uuid),

    /// Unrecognized action name
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Unrecognized filter, sort field or direction
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    /// Insert of a record whose id is already live
    #[error("Duplicate job id {0}")]
    DuplicateId(Uuid),
}

impl CrawlError {
    /// Check if this error refers to a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
