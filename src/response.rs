//! Response envelopes: each body is keyed by the resource name.

use crate::service::Job;
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct JobBody {
    pub job: Job,
}

#[derive(Serialize)]
pub struct JobsBody {
    pub jobs: Vec<Job>,
}

#[derive(Serialize)]
pub struct DeletedBody {
    /// Id of the removed row, as a string.
    pub deleted: String,
}

pub fn job_created(job: Job) -> (StatusCode, Json<JobBody>) {
    (StatusCode::CREATED, Json(JobBody { job }))
}

pub fn job_ok(job: Job) -> (StatusCode, Json<JobBody>) {
    (StatusCode::OK, Json(JobBody { job }))
}

pub fn jobs_ok(jobs: Vec<Job>) -> (StatusCode, Json<JobsBody>) {
    (StatusCode::OK, Json(JobsBody { jobs }))
}

pub fn deleted(id: impl ToString) -> (StatusCode, Json<DeletedBody>) {
    (
        StatusCode::OK,
        Json(DeletedBody {
            deleted: id.to_string(),
        }),
    )
}
