//! Crawl job endpoints

use crawlboard_core::domain::job::Job;
use crawlboard_core::domain::lifecycle::JobAction;
use crawlboard_core::dto::job::{
    ActionRequest, ActionResponse, BulkRequest, CreateJob, DeleteResponse, ListQuery, ViewParams,
};
use crawlboard_core::selection::{BulkAction, BulkReport, Selection};
use crawlboard_core::view::{Filter, JobView, StatusCounts, ViewQuery};
use uuid::Uuid;

use crate::CrawlboardClient;
use crate::error::Result;

impl CrawlboardClient {
    /// Submit a URL for analysis
    ///
    /// The server trims and validates the URL; an empty or unparsable URL
    /// comes back as a 400 API error.
    pub async fn create_job(&self, url: impl Into<String>) -> Result<Job> {
        let req = CreateJob { url: url.into() };
        let response = self.post("/crawl").json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Queue the demo URLs
    pub async fn seed_demo(&self) -> Result<Vec<Job>> {
        let response = self.post("/crawl/demo").send().await?;

        self.handle_response(response).await
    }

    /// List jobs matching `filter`, in submission order
    pub async fn list_jobs(&self, filter: &Filter) -> Result<Vec<Job>> {
        let query = ListQuery::from_filter(filter);
        let response = self.get("/crawl").query(&query).send().await?;

        self.handle_response(response).await
    }

    /// Fetch one sorted, filtered page
    pub async fn view(&self, query: &ViewQuery) -> Result<JobView> {
        let params = ViewParams::from_query(query);
        let response = self.get("/crawl/view").query(&params).send().await?;

        self.handle_response(response).await
    }

    /// Overview counts across all jobs
    pub async fn stats(&self) -> Result<StatusCounts> {
        let response = self.get("/crawl/stats").send().await?;

        self.handle_response(response).await
    }

    /// Get a job by ID
    pub async fn get_job(&self, id: Uuid) -> Result<Job> {
        let response = self.get(&format!("/crawl/{}", id)).send().await?;

        self.handle_response(response).await
    }

    /// Start, stop or rerun a job
    ///
    /// An action that does not apply to the job's current status is not an
    /// error; `applied` is false and the job comes back unchanged.
    pub async fn apply_action(&self, id: Uuid, action: JobAction) -> Result<ActionResponse> {
        let req = ActionRequest {
            action: action.to_string(),
        };
        let response = self
            .put(&format!("/crawl/{}", id))
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a job
    pub async fn delete_job(&self, id: Uuid) -> Result<()> {
        let response = self.delete(&format!("/crawl/{}", id)).send().await?;
        let _: DeleteResponse = self.handle_response(response).await?;

        Ok(())
    }

    /// Apply `action` to every selected job
    pub async fn bulk(&self, selection: &Selection, action: BulkAction) -> Result<BulkReport> {
        let req = BulkRequest {
            action: action.to_string(),
            ids: selection.ids().collect(),
        };
        let response = self.post("/crawl/bulk").json(&req).send().await?;

        self.handle_response(response).await
    }
}
