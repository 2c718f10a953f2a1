//! Job Service
//!
//! Submission, lookup and lifecycle actions for crawl jobs.
//!
//! Any user action that changes a job disarms its pending auto-start, so a
//! timer armed at submission can never undo a later manual stop or rerun.

use crawlboard_core::domain::job::{Job, validate_url};
use crawlboard_core::domain::lifecycle::{JobAction, Outcome, Transition};
use crawlboard_core::dto::job::CreateJob;
use crawlboard_core::error::{CrawlError, Result};
use crawlboard_core::selection::{BulkAction, BulkReport, Selection};
use crawlboard_core::simulation::DEMO_URLS;
use crawlboard_core::view::{self, Filter, JobView, StatusCounts, ViewQuery};
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::AppState;

/// Validate and queue a new crawl job, arming its auto-start
pub async fn create_job(state: &AppState, req: CreateJob) -> Result<Job> {
    let url = validate_url(&req.url)?;

    let job = state.repository.create(url).await?;
    state.scheduler.schedule_default_start(job.id);

    info!("Job created: {} for {}", job.id, job.url);

    Ok(job)
}

/// Queue one job per demo URL with staggered auto-starts
pub async fn seed_demo_jobs(state: &AppState) -> Result<Vec<Job>> {
    let mut jobs = Vec::with_capacity(DEMO_URLS.len());

    for (i, url) in DEMO_URLS.iter().enumerate() {
        let job = state.repository.create(url.to_string()).await?;
        let delay = state.config.demo_start_delay + state.config.demo_stagger * i as u32;
        state.scheduler.schedule_auto_start(job.id, delay);
        jobs.push(job);
    }

    info!("Seeded {} demo job(s)", jobs.len());

    Ok(jobs)
}

/// Get a job by ID
pub async fn get_job(state: &AppState, id: Uuid) -> Result<Job> {
    state
        .repository
        .find_by_id(id)
        .await
        .ok_or(CrawlError::NotFound(id))
}

/// Jobs matching `filter`, in insertion order
pub async fn list_jobs(state: &AppState, filter: &Filter) -> Vec<Job> {
    let jobs = state.repository.list_all().await;
    debug!("Listing jobs ({} total)", jobs.len());

    view::filter_jobs(&jobs, filter).into_iter().cloned().collect()
}

/// One filtered, sorted page plus overview counts
pub async fn view_jobs(state: &AppState, query: &ViewQuery) -> JobView {
    let jobs = state.repository.list_all().await;
    view::build_view(&jobs, query)
}

pub async fn status_counts(state: &AppState) -> StatusCounts {
    state.repository.counts().await
}

/// Apply a user action to one job
pub async fn apply_action(state: &AppState, id: Uuid, action: JobAction) -> Result<(Outcome, Job)> {
    let (outcome, job) = state
        .repository
        .transition(id, Transition::from(action))
        .await?;

    if outcome.is_applied() {
        state.scheduler.cancel(id);
        info!("Job {} {}: now {}", id, action, job.status);
    } else {
        debug!("Action {} on job {} ignored ({})", action, id, job.status);
    }

    Ok((outcome, job))
}

/// Delete a job and disarm its auto-start
pub async fn delete_job(state: &AppState, id: Uuid) -> Result<()> {
    state.repository.delete(id).await?;
    state.scheduler.cancel(id);

    info!("Job deleted: {}", id);

    Ok(())
}

/// Apply an action to every id in `ids`
pub async fn apply_bulk(state: &AppState, ids: Vec<Uuid>, action: BulkAction) -> BulkReport {
    let selection: Selection = ids.into_iter().collect();
    let report = state.repository.apply_bulk(selection, action).await;

    for id in &report.applied {
        state.scheduler.cancel(*id);
    }

    info!(
        "Bulk {}: {} applied, {} skipped, {} missing",
        action,
        report.applied.len(),
        report.skipped.len(),
        report.missing.len()
    );

    report
}
