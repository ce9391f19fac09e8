//! Schema DDL: `companies` then `jobs` (which references it). Idempotent.

use crate::error::AppError;
use sqlx::PgPool;

const CREATE_COMPANIES: &str = r#"
    CREATE TABLE IF NOT EXISTS companies (
        handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
        name TEXT UNIQUE NOT NULL,
        num_employees INTEGER CHECK (num_employees >= 0),
        description TEXT NOT NULL DEFAULT '',
        logo_url TEXT
    )
"#;

const CREATE_JOBS: &str = r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        salary INTEGER CHECK (salary >= 0),
        equity NUMERIC CHECK (equity <= 1.0),
        company_handle VARCHAR(25) NOT NULL
            REFERENCES companies ON DELETE CASCADE
    )
"#;

const CREATE_JOBS_TITLE_INDEX: &str = "CREATE INDEX IF NOT EXISTS jobs_title_idx ON jobs (title)";

/// Create the tables the service needs. Safe to run on every start.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for (name, ddl) in [
        ("companies", CREATE_COMPANIES),
        ("jobs", CREATE_JOBS),
        ("jobs_title_idx", CREATE_JOBS_TITLE_INDEX),
    ] {
        sqlx::query(ddl).execute(pool).await?;
        tracing::debug!(object = name, "ensured");
    }
    tracing::info!("migrations applied");
    Ok(())
}
