//! Jobs handlers: create, list, read, update, delete.
//! Reads are open to everyone; writes require an admin token.

use crate::error::AppError;
use crate::extractors::{AdminUser, CurrentUser, JsonObject};
use crate::response::{deleted, job_created, job_ok, jobs_ok};
use crate::service::{JobFilter, JobService, NewJob, RequestValidator, NEW_JOB_RULES, UPDATE_JOB_RULES};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid job id: {}", id_str)))
}

/// POST /jobs
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate(&body, NEW_JOB_RULES)?;
    let new_job = NewJob::from_body(body)?;
    let job = JobService::create(&state.pool, &new_job).await?;
    tracing::debug!(by = %admin.username, id = job.id, "create");
    Ok(job_created(job))
}

/// GET /jobs?minSalary=&hasEquity=&title=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = JobFilter::from_query(&params)?;
    let jobs = JobService::find_all(&state.pool, &filter).await?;
    Ok(jobs_ok(jobs))
}

/// GET /jobs/:id
pub async fn read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    tracing::debug!(id, user = ?user.as_ref().map(|c| c.username.as_str()), "read");
    let job = JobService::get(&state.pool, id).await?;
    Ok(job_ok(job))
}

/// PATCH /jobs/:id
pub async fn update(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id_str): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    RequestValidator::validate(&body, UPDATE_JOB_RULES)?;
    let job = JobService::update(&state.pool, id, &body).await?;
    tracing::debug!(by = %admin.username, id, "update");
    Ok(job_ok(job))
}

/// DELETE /jobs/:id
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    JobService::remove(&state.pool, id).await?;
    tracing::debug!(by = %admin.username, id, "delete");
    Ok(deleted(id))
}
