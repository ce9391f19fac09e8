#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use jobly::{app, apply_migrations, create_token, AppState};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

pub const SECRET: &str = "secret-test";

/// Live-database tests share one database; run them one at a time.
pub static DB_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

pub fn test_database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL_TEST").unwrap_or_else(|_| "postgresql:///jobly_test".into())
}

/// State whose pool never connects until a query runs.
pub fn lazy_state() -> AppState {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&test_database_url())
        .unwrap();
    AppState::new(pool, SECRET)
}

pub fn router(state: AppState) -> Router {
    app(state, 1024 * 1024)
}

pub fn admin_token() -> String {
    create_token("u2", true, SECRET).unwrap()
}

pub fn user_token() -> String {
    create_token("u1", false, SECRET).unwrap()
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header("authorization", format!("Bearer {}", t));
    }
    let req = match body {
        Some(v) => req
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    router.clone().oneshot(req).await.unwrap()
}

/// Send `body` as-is, with an optional content type.
pub async fn send_raw(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header("authorization", format!("Bearer {}", t));
    }
    if let Some(ct) = content_type {
        req = req.header("content-type", ct);
    }
    let req = req.body(Body::from(body.to_string())).unwrap();
    router.clone().oneshot(req).await.unwrap()
}

pub async fn json_body(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn expect_status(resp: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(resp.status(), status);
    json_body(resp).await
}

/// Fresh tables with companies c1..c3 and jobs j1..j3. Returns the job ids in title order.
pub async fn seed(pool: &PgPool) -> Vec<i32> {
    apply_migrations(pool).await.unwrap();
    sqlx::query("TRUNCATE jobs, companies RESTART IDENTITY CASCADE")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO companies (handle, name, num_employees, description, logo_url)
         VALUES ('c1', 'C1', 1, 'Desc1', 'http://c1.img'),
                ('c2', 'C2', 2, 'Desc2', 'http://c2.img'),
                ('c3', 'C3', 3, 'Desc3', 'http://c3.img')",
    )
    .execute(pool)
    .await
    .unwrap();
    let rows: Vec<(i32,)> = sqlx::query_as(
        "INSERT INTO jobs (title, salary, equity, company_handle)
         VALUES ('j1', 100, '0', 'c1'),
                ('j2', 200, '0.1', 'c2'),
                ('j3', 300, '0.9', 'c3')
         RETURNING id",
    )
    .fetch_all(pool)
    .await
    .unwrap();
    rows.into_iter().map(|(id,)| id).collect()
}

pub async fn live_pool() -> PgPool {
    let url = test_database_url();
    jobly::ensure_database_exists(&url).await.unwrap();
    PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap()
}
