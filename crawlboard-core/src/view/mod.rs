//! Collection views
//!
//! Read-only projections of a job set: filter, then sort, then paginate.
//! Nothing in here mutates the jobs it is given; every function works on a
//! borrowed snapshot and returns new values.

mod counts;
mod filter;
mod page;
mod sort;

pub use counts::StatusCounts;
pub use filter::{Filter, StatusFilter, filter_jobs};
pub use page::{PAGE_SIZE, Page, Pager, clamp_page, paginate};
pub use sort::{SortDirection, SortField, SortSpec, sort_jobs};

use serde::{Deserialize, Serialize};

use crate::domain::job::Job;

/// Everything needed to derive one page of the dashboard table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub filter: Filter,
    pub sort: SortSpec,
    /// 1-based requested page, clamped when the view is built
    pub page: usize,
}

/// A derived page plus the overview counts shown next to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub page: Page<Job>,
    /// Counts over the unfiltered collection
    pub counts: StatusCounts,
}

impl JobView {
    /// Number of jobs that passed the filter
    pub fn filtered_count(&self) -> usize {
        self.page.total_items
    }
}

/// Filter, sort and paginate `jobs` according to `query`
pub fn build_view(jobs: &[Job], query: &ViewQuery) -> JobView {
    let mut visible = filter_jobs(jobs, &query.filter);
    sort_jobs(&mut visible, query.sort);

    let page = paginate(&visible, query.page, PAGE_SIZE).map(|job| (*job).clone());

    JobView {
        page,
        counts: StatusCounts::from_jobs(jobs),
    }
}
