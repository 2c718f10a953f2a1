//! Analysis payload attached to a completed job

use serde::{Deserialize, Serialize};

/// Result of analysing one page
///
/// Immutable once attached; a rerun drops it rather than editing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub html_version: String,
    pub title: String,
    pub heading_counts: HeadingCounts,
    pub internal_links: u32,
    pub external_links: u32,
    pub broken_links: Vec<BrokenLink>,
    pub has_login_form: bool,
}

impl AnalysisPayload {
    /// Internal plus external links
    pub fn total_links(&self) -> u32 {
        self.internal_links + self.external_links
    }
}

/// Number of headings per level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCounts {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub h4: u32,
    pub h5: u32,
    pub h6: u32,
}

impl HeadingCounts {
    /// Counts ordered h1..h6
    pub fn as_array(&self) -> [u32; 6] {
        [self.h1, self.h2, self.h3, self.h4, self.h5, self.h6]
    }

    pub fn total(&self) -> u32 {
        self.as_array().iter().sum()
    }
}

/// A link that answered with a 4xx/5xx status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenLink {
    pub url: String,
    pub status_code: u16,
}

impl BrokenLink {
    pub fn new(url: impl Into<String>, status_code: u16) -> Self {
        Self {
            url: url.into(),
            status_code,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code >= 500
    }
}
