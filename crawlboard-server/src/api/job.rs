//! Crawl Job API Handlers
//!
//! HTTP endpoints for submitting, inspecting and acting on crawl jobs.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use crawlboard_core::domain::job::Job;
use crawlboard_core::domain::lifecycle::JobAction;
use crawlboard_core::dto::job::{
    ActionRequest, ActionResponse, BulkRequest, CreateJob, DeleteResponse, ListQuery, ViewParams,
};
use crawlboard_core::selection::{BulkAction, BulkReport};
use crawlboard_core::view::{JobView, StatusCounts};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::service::job_service;
use crate::state::AppState;

/// Unwrap a JSON body, answering malformed ones with a plain 400
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        tracing::warn!("Invalid request body: {}", rejection.body_text());
        ApiError::BadRequest("Invalid request body".to_string())
    })
}

/// Unwrap a job id, answering malformed ones like unknown ids
fn job_id(path: Result<Path<Uuid>, PathRejection>) -> ApiResult<Uuid> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("Malformed job id: {}", rejection.body_text());
        ApiError::NotFound("Result not found".to_string())
    })
}

/// GET /crawl
/// List jobs, optionally filtered by status and search text
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Job>>> {
    let filter = query.to_filter()?;
    let jobs = job_service::list_jobs(&state, &filter).await;

    Ok(Json(jobs))
}

/// GET /crawl/view
/// One sorted page of the filtered jobs plus overview counts
pub async fn view_jobs(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> ApiResult<Json<JobView>> {
    let query = params.to_query()?;
    tracing::debug!(
        "Viewing jobs: filter={:?} sort={:?} page={}",
        query.filter,
        query.sort,
        query.page
    );

    Ok(Json(job_service::view_jobs(&state, &query).await))
}

/// GET /crawl/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<StatusCounts> {
    Json(job_service::status_counts(&state).await)
}

/// POST /crawl
/// Submit a URL for analysis
pub async fn create_job(
    State(state): State<AppState>,
    payload: Result<Json<CreateJob>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    let req = body(payload)?;

    let job = job_service::create_job(&state, req).await.map_err(|e| {
        tracing::warn!("Rejected submission: {}", e);
        ApiError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// POST /crawl/demo
/// Queue the demo URLs
pub async fn seed_demo(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<Vec<Job>>)> {
    let jobs = job_service::seed_demo_jobs(&state).await?;

    Ok((StatusCode::CREATED, Json(jobs)))
}

/// POST /crawl/bulk
/// Apply one action to a set of jobs
pub async fn bulk_action(
    State(state): State<AppState>,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> ApiResult<Json<BulkReport>> {
    let req = body(payload)?;
    let action: BulkAction = req.action.parse()?;

    Ok(Json(job_service::apply_bulk(&state, req.ids, action).await))
}

/// GET /crawl/{id}
pub async fn get_job(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Job>> {
    let id = job_id(path)?;
    tracing::debug!("Getting job: {}", id);

    let job = job_service::get_job(&state, id).await?;

    Ok(Json(job))
}

/// PUT /crawl/{id}
/// Start, stop or rerun a job
pub async fn apply_action(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> ApiResult<Json<ActionResponse>> {
    let id = job_id(path)?;
    let req = body(payload)?;
    let action: JobAction = req.action.parse()?;

    let (outcome, job) = job_service::apply_action(&state, id, action).await?;

    Ok(Json(ActionResponse {
        applied: outcome.is_applied(),
        job,
    }))
}

/// DELETE /crawl/{id}
pub async fn delete_job(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = job_id(path)?;
    job_service::delete_job(&state, id).await?;

    Ok(Json(DeleteResponse { success: true }))
}
