//! Route tables and the assembled application router.

pub mod common;
pub mod jobs;
pub use common::common_routes;
pub use jobs::job_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".into())
}

/// Full application: common routes, jobs, JSON 404 fallback, request tracing and a body size limit.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(job_routes(state))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
}
