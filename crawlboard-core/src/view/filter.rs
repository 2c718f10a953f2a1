//! Status and text filtering

use serde::{Deserialize, Serialize};

use crate::domain::job::{Job, JobStatus};
use crate::error::CrawlError;

/// Status part of a filter: everything, or a single status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

impl StatusFilter {
    pub fn matches(self, status: JobStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = CrawlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

/// Status filter plus free-text search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub status: StatusFilter,
    /// Case-insensitive substring of the URL or payload title; empty matches all
    pub search: String,
}

impl Filter {
    pub fn new(status: StatusFilter, search: impl Into<String>) -> Self {
        Self {
            status,
            search: search.into(),
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        self.status.matches(job.status) && self.matches_search(job)
    }

    fn matches_search(&self, job: &Job) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        job.url.to_lowercase().contains(&needle)
            || job
                .title()
                .is_some_and(|title| title.to_lowercase().contains(&needle))
    }
}

/// Jobs passing `filter`, in their original order
pub fn filter_jobs<'a>(jobs: &'a [Job], filter: &Filter) -> Vec<&'a Job> {
    jobs.iter().filter(|job| filter.matches(job)).collect()
}
