//! Jobs routes.

use crate::handlers::jobs::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn job_routes(state: AppState) -> Router {
    Router::new()
        .route("/jobs", get(list).post(create))
        .route("/jobs/:id", get(read).patch(update).delete(delete_handler))
        .with_state(state)
}
