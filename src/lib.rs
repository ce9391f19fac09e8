//! Jobly: jobs REST backend on PostgreSQL.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{create_token, verify_token, Claims};
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{app, common_routes, job_routes};
pub use service::{Job, JobFilter, JobService, NewJob};
pub use sql::{sql_for_partial_update, PartialUpdate};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
