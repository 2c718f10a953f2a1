//! Job DTOs for client/server communication

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::Job;
use crate::error::Result;
use crate::view::{Filter, SortDirection, SortField, SortSpec, StatusFilter, ViewQuery};

/// Request to submit a URL for crawling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateJob {
    /// Missing and blank are both rejected as an empty URL
    #[serde(default)]
    pub url: String,
}

/// Request to apply a single-job action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    /// `start`, `stop` or `rerun`
    pub action: String,
}

/// Result of a single-job action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    /// `false` when the action did not apply to the job's status
    pub applied: bool,
    pub job: Job,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Request to apply an action to a selected set of jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRequest {
    /// `start`, `stop`, `rerun` or `delete`
    pub action: String,
    pub ids: Vec<Uuid>,
}

/// Query parameters for listing jobs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn from_filter(filter: &Filter) -> Self {
        Self {
            status: match filter.status {
                StatusFilter::All => None,
                status => Some(status.to_string()),
            },
            search: Some(filter.search.clone()).filter(|s| !s.is_empty()),
        }
    }

    pub fn to_filter(&self) -> Result<Filter> {
        let status = match &self.status {
            Some(status) => status.parse()?,
            None => StatusFilter::All,
        };
        Ok(Filter::new(status, self.search.clone().unwrap_or_default()))
    }
}

/// Query parameters for a filtered, sorted, paginated view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

impl ViewParams {
    pub fn from_query(query: &ViewQuery) -> Self {
        let list = ListQuery::from_filter(&query.filter);
        Self {
            status: list.status,
            search: list.search,
            sort: Some(query.sort.field.to_string()),
            direction: Some(
                match query.sort.direction {
                    SortDirection::Asc => "asc",
                    SortDirection::Desc => "desc",
                }
                .to_string(),
            ),
            page: Some(query.page.max(1)),
        }
    }

    pub fn to_query(&self) -> Result<ViewQuery> {
        let filter = ListQuery {
            status: self.status.clone(),
            search: self.search.clone(),
        }
        .to_filter()?;

        let defaults = SortSpec::default();
        let field = match &self.sort {
            Some(field) => field.parse::<SortField>()?,
            None => defaults.field,
        };
        let direction = match &self.direction {
            Some(direction) => direction.parse::<SortDirection>()?,
            None if self.sort.is_some() => SortDirection::Asc,
            None => defaults.direction,
        };

        Ok(ViewQuery {
            filter,
            sort: SortSpec::new(field, direction),
            page: self.page.unwrap_or(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CrawlError;
    use crate::domain::job::JobStatus;

    #[test]
    fn test_list_query_defaults_to_everything() {
        let filter = ListQuery::default().to_filter().unwrap();
        assert_eq!(filter, Filter::default());
    }

    #[test]
    fn test_list_query_rejects_unknown_status() {
        let query = ListQuery {
            status: Some("finished".to_string()),
            search: None,
        };
        assert!(matches!(query.to_filter(), Err(CrawlError::InvalidQuery(_))));
    }

    #[test]
    fn test_view_params_round_trip_through_query() {
        let query = ViewQuery {
            filter: Filter::new(StatusFilter::Only(JobStatus::Running), "react"),
            sort: SortSpec::new(SortField::ExternalLinks, SortDirection::Asc),
            page: 3,
        };

        let parsed = ViewParams::from_query(&query).to_query().unwrap();
        assert_eq!(parsed, query);
    }

    #[test]
    fn test_view_params_sort_without_direction_is_ascending() {
        let params = ViewParams {
            sort: Some("title".to_string()),
            ..ViewParams::default()
        };
        let query = params.to_query().unwrap();
        assert_eq!(query.sort, SortSpec::new(SortField::Title, SortDirection::Asc));
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_create_job_without_url_deserializes_blank() {
        let req: CreateJob = serde_json::from_str("{}").unwrap();
        assert!(req.url.is_empty());
    }
}
