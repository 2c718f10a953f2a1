//! Stable sorting by a selected column

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::job::Job;
use crate::error::CrawlError;

/// Column a view can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Url,
    Status,
    Title,
    CreatedAt,
    InternalLinks,
    ExternalLinks,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Url => "url",
            SortField::Status => "status",
            SortField::Title => "title",
            SortField::CreatedAt => "createdAt",
            SortField::InternalLinks => "internalLinks",
            SortField::ExternalLinks => "externalLinks",
        }
    }

    /// Compare two jobs by this field, ascending
    ///
    /// Jobs without a payload sort as an empty title and zero links.
    pub fn compare(self, a: &Job, b: &Job) -> Ordering {
        match self {
            SortField::Url => a.url.cmp(&b.url),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::Title => a.title().unwrap_or("").cmp(b.title().unwrap_or("")),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::InternalLinks => internal_links(a).cmp(&internal_links(b)),
            SortField::ExternalLinks => external_links(a).cmp(&external_links(b)),
        }
    }
}

fn internal_links(job: &Job) -> u32 {
    job.data.as_ref().map_or(0, |data| data.internal_links)
}

fn external_links(job: &Job) -> u32 {
    job.data.as_ref().map_or(0, |data| data.external_links)
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortField {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "url" => Ok(SortField::Url),
            "status" => Ok(SortField::Status),
            "title" => Ok(SortField::Title),
            "createdat" => Ok(SortField::CreatedAt),
            "internallinks" => Ok(SortField::InternalLinks),
            "externallinks" => Ok(SortField::ExternalLinks),
            _ => Err(CrawlError::InvalidQuery(format!("unknown sort field '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(CrawlError::InvalidQuery(format!("unknown sort direction '{}'", s))),
        }
    }
}

/// Field and direction; defaults to newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header-click behavior: same field flips direction, new field starts ascending
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.reversed())
        } else {
            Self::new(field, SortDirection::Asc)
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortField::CreatedAt, SortDirection::Desc)
    }
}

/// Sort in place; jobs with equal keys keep their relative order
pub fn sort_jobs(jobs: &mut [&Job], spec: SortSpec) {
    // slice::sort_by is a stable merge sort
    match spec.direction {
        SortDirection::Asc => jobs.sort_by(|a, b| spec.field.compare(a, b)),
        SortDirection::Desc => jobs.sort_by(|a, b| spec.field.compare(b, a)),
    }
}
