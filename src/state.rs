//! Shared application state for all routes.

use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Secret used to verify bearer tokens.
    pub secret_key: Arc<str>,
}

impl AppState {
    pub fn new(pool: PgPool, secret_key: impl Into<Arc<str>>) -> Self {
        AppState {
            pool,
            secret_key: secret_key.into(),
        }
    }
}
