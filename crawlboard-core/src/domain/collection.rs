//! Ordered job collection
//!
//! The single owner of every live job record. Insertion order is preserved
//! and is the tie-break order for every derived view.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::job::{Job, JobStatus};
use crate::domain::lifecycle::{self, Outcome, Transition};
use crate::error::{CrawlError, Result};
use crate::view::StatusCounts;

/// Live jobs in insertion order, unique by id
#[derive(Debug, Clone, Default)]
pub struct JobCollection {
    jobs: Vec<Job>,
}

impl JobCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs in insertion order
    pub fn as_slice(&self) -> &[Job] {
        &self.jobs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Append a job, refusing ids that are already live
    pub fn insert(&mut self, job: Job) -> Result<&Job> {
        if self.contains(job.id) {
            return Err(CrawlError::DuplicateId(job.id));
        }

        self.jobs.push(job);
        Ok(&self.jobs[self.jobs.len() - 1])
    }

    /// Remove a job entirely, returning it if it was present
    pub fn remove(&mut self, id: Uuid) -> Option<Job> {
        let index = self.jobs.iter().position(|job| job.id == id)?;
        Some(self.jobs.remove(index))
    }

    /// Apply a lifecycle transition to the job with `id`
    ///
    /// The current status is checked at the moment of the call, so a
    /// transition decided earlier can never resurrect or overwrite a job that
    /// was stopped, rerun or deleted in the meantime.
    pub fn apply(
        &mut self,
        id: Uuid,
        transition: Transition,
        now: DateTime<Utc>,
    ) -> Result<(Outcome, &Job)> {
        let job = self
            .jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or(CrawlError::NotFound(id))?;

        let outcome = lifecycle::apply(job, transition, now);
        Ok((outcome, job))
    }

    /// Jobs currently in `status`, in insertion order
    pub fn with_status(&self, status: JobStatus) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(move |job| job.status == status)
    }

    /// Totals over the whole collection, ignoring any view filter
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::from_jobs(&self.jobs)
    }
}

impl FromIterator<Job> for JobCollection {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        let mut collection = JobCollection::new();
        for job in iter {
            // Later duplicates lose, keeping ids unique
            let _ = collection.insert(job);
        }
        collection
    }
}
