//! Job Repository
//!
//! Holds every live job in memory. Nothing survives a restart.

use std::sync::Arc;

use async_trait::async_trait;
use crawlboard_core::domain::collection::JobCollection;
use crawlboard_core::domain::job::{Job, JobStatus};
use crawlboard_core::domain::lifecycle::{Outcome, Transition};
use crawlboard_core::error::{CrawlError, Result};
use crawlboard_core::selection::{self, BulkAction, BulkReport, Selection};
use crawlboard_core::simulation::Clock;
use crawlboard_core::view::StatusCounts;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage operations for crawl jobs
///
/// Every mutation checks the job's current state under the same lock that
/// performs the write, so callers never act on a stale read.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Create a queued job for an already validated URL
    async fn create(&self, url: String) -> Result<Job>;

    /// Find a job by ID
    async fn find_by_id(&self, id: Uuid) -> Option<Job>;

    /// Snapshot of every job in insertion order
    async fn list_all(&self) -> Vec<Job>;

    /// Snapshot of jobs currently in `status`, in insertion order
    async fn find_by_status(&self, status: JobStatus) -> Vec<Job>;

    /// Apply a lifecycle transition, returning the job as it is afterwards
    async fn transition(&self, id: Uuid, transition: Transition) -> Result<(Outcome, Job)>;

    /// Remove a job, returning the removed record
    async fn delete(&self, id: Uuid) -> Result<Job>;

    /// Apply an action to every selected job as one batch
    async fn apply_bulk(&self, selection: Selection, action: BulkAction) -> BulkReport;

    /// Totals over the whole collection
    async fn counts(&self) -> StatusCounts;
}

/// In-memory implementation of JobRepository
pub struct InMemoryJobRepository {
    jobs: RwLock<JobCollection>,
    clock: Arc<dyn Clock>,
}

impl InMemoryJobRepository {
    /// Creates an empty repository stamping transitions with `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            jobs: RwLock::new(JobCollection::new()),
            clock,
        }
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, url: String) -> Result<Job> {
        let job = Job::new(url, self.clock.now());

        let mut jobs = self.jobs.write().await;
        let job = jobs.insert(job)?.clone();

        Ok(job)
    }

    async fn find_by_id(&self, id: Uuid) -> Option<Job> {
        self.jobs.read().await.get(id).cloned()
    }

    async fn list_all(&self) -> Vec<Job> {
        self.jobs.read().await.as_slice().to_vec()
    }

    async fn find_by_status(&self, status: JobStatus) -> Vec<Job> {
        self.jobs
            .read()
            .await
            .with_status(status)
            .cloned()
            .collect()
    }

    async fn transition(&self, id: Uuid, transition: Transition) -> Result<(Outcome, Job)> {
        let mut jobs = self.jobs.write().await;
        let now = self.clock.now();

        let (outcome, job) = jobs.apply(id, transition, now)?;
        Ok((outcome, job.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<Job> {
        self.jobs
            .write()
            .await
            .remove(id)
            .ok_or(CrawlError::NotFound(id))
    }

    async fn apply_bulk(&self, mut selection: Selection, action: BulkAction) -> BulkReport {
        let mut jobs = self.jobs.write().await;
        let now = self.clock.now();

        selection::apply_bulk(&mut jobs, &mut selection, action, now)
    }

    async fn counts(&self) -> StatusCounts {
        self.jobs.read().await.counts()
    }
}
