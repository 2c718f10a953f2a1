//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::domain::payload::AnalysisPayload;
use crate::error::{CrawlError, Result};

/// Crawl job record
///
/// One submitted URL and its crawl/analysis state. `id`, `url` and
/// `created_at` never change after creation; everything else is driven by
/// the lifecycle in [`crate::domain::lifecycle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub url: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub data: Option<AnalysisPayload>,
}

impl Job {
    /// Creates a fresh queued job with a random id
    ///
    /// The url is taken as-is; run it through [`validate_url`] first.
    pub fn new(url: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            status: JobStatus::Queued,
            created_at,
            started_at: None,
            completed_at: None,
            data: None,
        }
    }

    /// Title from the attached payload, if any
    pub fn title(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.title.as_str())
    }

    /// Host part of the job URL
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }

    /// Whether the job is waiting for or undergoing a crawl
    pub fn is_active(&self) -> bool {
        matches!(self.status, JobStatus::Queued | JobStatus::Running)
    }

    /// Time between start and completion of the last run
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => Some(completed.signed_duration_since(started)),
            _ => None,
        }
    }
}

/// Job crawl status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Error,
    Stopped,
}

impl JobStatus {
    /// Every status, in overview display order
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Queued,
        JobStatus::Running,
        JobStatus::Completed,
        JobStatus::Error,
        JobStatus::Stopped,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
            JobStatus::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CrawlError::InvalidQuery(format!("unknown status '{}'", s)))
    }
}

/// Validate a submitted URL
///
/// Blank input is [`CrawlError::EmptyUrl`]; anything that does not parse as
/// an absolute URL is [`CrawlError::InvalidUrl`]. Returns the trimmed input
/// that should be stored on the job.
pub fn validate_url(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CrawlError::EmptyUrl);
    }

    Url::parse(trimmed).map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

    Ok(trimmed.to_string())
}
