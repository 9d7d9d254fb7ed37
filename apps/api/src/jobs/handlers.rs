//! Axum route handlers for the Job API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{PathParam, ValidatedJson};
use crate::jobs::models::{Job, JobBoard, JobChanges, NewJob, ReorderJobs};
use crate::state::AppState;

fn job_not_found(job_id: Uuid) -> AppError {
    warn!("Job {job_id} not found");
    AppError::NotFound("No job found".to_string())
}

/// GET /api/job
///
/// Returns the caller's jobs grouped by status column.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<JobBoard>, AppError> {
    let jobs = state.jobs.list(auth.user_id).await?;
    let board = JobBoard::from_jobs(jobs);
    debug!("Listed {} jobs for user {}", board.job_count(), auth.user_id);
    Ok(Json(board))
}

/// GET /api/job/:jobId
pub async fn handle_get_job(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(job_id): PathParam<Uuid>,
) -> Result<Json<Job>, AppError> {
    let job = state
        .jobs
        .get(auth.user_id, job_id)
        .await?
        .ok_or_else(|| job_not_found(job_id))?;
    Ok(Json(job))
}

/// POST /api/job
pub async fn handle_create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(new_job): ValidatedJson<NewJob>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = state.jobs.create(auth.user_id, new_job).await?;
    info!(
        "Created job {} for user {} at status {} order {}",
        job.id, auth.user_id, job.status, job.order
    );
    Ok((StatusCode::CREATED, Json(job)))
}

/// PATCH /api/job/:jobId
///
/// Moving a job between columns here does not renumber its siblings; clients
/// follow up with PATCH /api/job/order.
pub async fn handle_edit_job(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(job_id): PathParam<Uuid>,
    ValidatedJson(changes): ValidatedJson<JobChanges>,
) -> Result<Json<Job>, AppError> {
    let job = state
        .jobs
        .update(auth.user_id, job_id, changes)
        .await?
        .ok_or_else(|| job_not_found(job_id))?;
    Ok(Json(job))
}

/// PATCH /api/job/order
pub async fn handle_reorder_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(ReorderJobs(updates)): ValidatedJson<ReorderJobs>,
) -> Result<Json<&'static str>, AppError> {
    let touched = state.jobs.reorder(auth.user_id, &updates).await?;
    info!(
        "Reordered {touched}/{} jobs for user {}",
        updates.len(),
        auth.user_id
    );
    Ok(Json("Job order updated"))
}

/// DELETE /api/job/:jobId
pub async fn handle_delete_job(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(job_id): PathParam<Uuid>,
) -> Result<Json<&'static str>, AppError> {
    if !state.jobs.delete(auth.user_id, job_id).await? {
        return Err(job_not_found(job_id));
    }
    info!("Deleted job {job_id} for user {}", auth.user_id);
    Ok(Json("Job deleted successfully"))
}
