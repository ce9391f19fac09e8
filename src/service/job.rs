//! Job data access against the `jobs` table.

use crate::error::AppError;
use crate::service::validation::{FieldKind, ValidationRule, EQUITY_PATTERN};
use crate::sql::{sql_for_cast_partial_update, PgBindValue, QueryBuf};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use sqlx::PgPool;
use std::collections::HashMap;

/// Columns returned for every job. `equity` is NUMERIC; read it back as text.
const JOB_COLUMNS: &str = "id, title, salary, equity::text AS equity, company_handle";

/// Column types that need an explicit cast when bound from text.
const JOB_COLUMN_CASTS: &[(&str, &str)] = &[("equity", "numeric")];

/// Fields a partial update may touch.
pub const UPDATABLE_FIELDS: &[&str] = &["title", "salary", "equity"];

/// Rules for a new job body.
pub const NEW_JOB_RULES: &[ValidationRule] = &[
    ValidationRule::new("title", FieldKind::String).required().min_length(1),
    ValidationRule::new("salary", FieldKind::Integer).nullable().minimum(0.0),
    ValidationRule::new("equity", FieldKind::Decimal).nullable().pattern(EQUITY_PATTERN),
    ValidationRule::new("companyHandle", FieldKind::String).required().min_length(1).max_length(25),
];

/// Rules for a job update body. `id` and `companyHandle` have no rule, so they are rejected.
pub const UPDATE_JOB_RULES: &[ValidationRule] = &[
    ValidationRule::new("title", FieldKind::String).min_length(1),
    ValidationRule::new("salary", FieldKind::Integer).nullable().minimum(0.0),
    ValidationRule::new("equity", FieldKind::Decimal).nullable().pattern(EQUITY_PATTERN),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// Decimal string, e.g. `"0.1"`.
    pub equity: Option<String>,
    pub company_handle: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    /// Decimal string, stored as given.
    #[serde(default, deserialize_with = "deserialize_equity")]
    pub equity: Option<String>,
    pub company_handle: String,
}

impl NewJob {
    /// Build from an already-validated request body.
    pub fn from_body(body: Map<String, Value>) -> Result<Self, AppError> {
        serde_json::from_value(Value::Object(body)).map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// Equity arrives as a number or a decimal string; keep its text form.
fn deserialize_equity<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(v) => equity_text(&v)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid equity: {}", v))),
    }
}

fn equity_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Optional filters for [`JobService::find_all`]. All present filters must match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobFilter {
    pub min_salary: Option<i32>,
    /// `Some(true)` keeps only jobs with equity above zero; `Some(false)` does not filter.
    pub has_equity: Option<bool>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
}

impl JobFilter {
    /// Parse `minSalary`, `hasEquity`, `title` from query params. Any other key is rejected.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut filter = JobFilter::default();
        let mut errors = Vec::new();
        for (k, v) in params {
            match k.as_str() {
                "minSalary" => match v.trim().parse::<i32>() {
                    Ok(n) if n >= 0 => filter.min_salary = Some(n),
                    _ => errors.push("minSalary must be a non-negative integer".to_string()),
                },
                "hasEquity" => match v.trim() {
                    s if s.eq_ignore_ascii_case("true") => filter.has_equity = Some(true),
                    s if s.eq_ignore_ascii_case("false") => filter.has_equity = Some(false),
                    _ => errors.push("hasEquity must be true or false".to_string()),
                },
                "title" => {
                    if v.is_empty() {
                        errors.push("title must be at least 1 characters".to_string());
                    } else {
                        filter.title = Some(v.clone());
                    }
                }
                other => errors.push(format!("{} is not allowed", other)),
            }
        }
        if errors.is_empty() {
            Ok(filter)
        } else {
            errors.sort();
            Err(AppError::Validation(errors))
        }
    }

    /// Append ` WHERE ...` (or nothing) to `q.sql`, pushing parameters in clause order.
    pub fn push_where(&self, q: &mut QueryBuf) {
        let mut where_parts = Vec::new();
        if let Some(min) = self.min_salary {
            let n = q.push_param(Value::from(min));
            where_parts.push(format!("salary >= ${}", n));
        }
        if self.has_equity == Some(true) {
            where_parts.push("equity > 0".to_string());
        }
        if let Some(title) = &self.title {
            let n = q.push_param(Value::String(format!("%{}%", escape_like(title))));
            where_parts.push(format!("title ILIKE ${}", n));
        }
        if !where_parts.is_empty() {
            q.sql.push_str(" WHERE ");
            q.sql.push_str(&where_parts.join(" AND "));
        }
    }
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Numeric equity values are bound as text, like strings, and cast to NUMERIC.
fn equity_as_text(data: &mut Map<String, Value>) -> Result<(), AppError> {
    if let Some(v @ Value::Number(_)) = data.get("equity") {
        let text = equity_text(v)
            .ok_or_else(|| AppError::BadRequest(format!("invalid equity: {}", v)))?;
        data.insert("equity".into(), Value::String(text));
    }
    Ok(())
}

/// Constraint failures on insert/update are the caller's fault.
fn map_write_error(e: sqlx::Error, company_handle: Option<&str>) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_foreign_key_violation() {
            return AppError::BadRequest(format!("No company: {}", company_handle.unwrap_or("")));
        }
        if db.is_check_violation() {
            return AppError::BadRequest(db.message().to_string());
        }
    }
    AppError::Db(e)
}

pub struct JobService;

impl JobService {
    /// Insert one job. Returns the created row including its generated id.
    pub async fn create(pool: &PgPool, data: &NewJob) -> Result<Job, AppError> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3::numeric, $4) RETURNING {}",
            JOB_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(&data.title)
            .bind(data.salary)
            .bind(data.equity.as_deref())
            .bind(&data.company_handle)
            .fetch_one(pool)
            .await
            .map_err(|e| map_write_error(e, Some(data.company_handle.as_str())))?;
        tracing::info!(id = job.id, company = %job.company_handle, "job created");
        Ok(job)
    }

    /// All jobs matching `filter`, ordered by title.
    pub async fn find_all(pool: &PgPool, filter: &JobFilter) -> Result<Vec<Job>, AppError> {
        let mut q = QueryBuf::default();
        q.sql = format!("SELECT {} FROM jobs", JOB_COLUMNS);
        filter.push_where(&mut q);
        q.sql.push_str(" ORDER BY title, id");
        Self::query_many(pool, &q).await
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Job, AppError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No job: {}", id)))
    }

    /// Partial update of title/salary/equity. Empty `data` is a bad request even
    /// when the job does not exist.
    pub async fn update(pool: &PgPool, id: i32, data: &Map<String, Value>) -> Result<Job, AppError> {
        if let Some(key) = data.keys().find(|k| !UPDATABLE_FIELDS.contains(&k.as_str())) {
            return Err(AppError::BadRequest(format!("{} cannot be updated", key)));
        }
        let mut data = data.clone();
        equity_as_text(&mut data)?;
        let casts: HashMap<&str, &str> = JOB_COLUMN_CASTS.iter().copied().collect();
        let update = sql_for_cast_partial_update(&data, &HashMap::new(), &casts)?;

        let mut q = QueryBuf {
            sql: String::new(),
            params: update.values,
        };
        let id_param = q.push_param(Value::from(id));
        q.sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            update.set_cols, id_param, JOB_COLUMNS
        );
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        // Parameter types follow the JSON values; the same SQL text may carry other types next call.
        let mut query = sqlx::query_as::<_, Job>(&q.sql).persistent(false);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p)?);
        }
        let job = query
            .fetch_optional(pool)
            .await
            .map_err(|e| map_write_error(e, None))?
            .ok_or_else(|| AppError::NotFound(format!("No job: {}", id)))?;
        tracing::info!(id, "job updated");
        Ok(job)
    }

    pub async fn remove(pool: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted: Option<(i32,)> = sqlx::query_as("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("No job: {}", id)));
        }
        tracing::info!(id, "job removed");
        Ok(())
    }

    async fn query_many(pool: &PgPool, q: &QueryBuf) -> Result<Vec<Job>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Job>(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p)?);
        }
        Ok(query.fetch_all(pool).await?)
    }
}
