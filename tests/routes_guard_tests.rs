//! Route guards and request validation. These paths reject before any query
//! runs, so the pool is never connected.

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn health_is_ok() {
    let app = router(lazy_state());
    let body = expect_status(send(&app, "GET", "/health", None, None).await, StatusCode::OK).await;
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn unknown_path_is_json_404() {
    let app = router(lazy_state());
    let body = expect_status(send(&app, "GET", "/nope", None, None).await, StatusCode::NOT_FOUND).await;
    assert_eq!(body["error"]["status"], 404);
}

#[tokio::test]
async fn create_requires_admin() {
    let app = router(lazy_state());
    let new_job = json!({"title": "new", "salary": 500, "equity": null, "companyHandle": "c1"});

    let anon = send(&app, "POST", "/jobs", None, Some(new_job.clone())).await;
    let body = expect_status(anon, StatusCode::UNAUTHORIZED).await;
    assert_eq!(body["error"]["code"], "unauthorized");

    let user = send(&app, "POST", "/jobs", Some(&user_token()), Some(new_job)).await;
    expect_status(user, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn create_rejects_missing_data() {
    let app = router(lazy_state());
    let resp = send(&app, "POST", "/jobs", Some(&admin_token()), Some(json!({"title": "new"}))).await;
    let body = expect_status(resp, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"], json!(["companyHandle is required"]));
}

#[tokio::test]
async fn create_rejects_invalid_data() {
    let app = router(lazy_state());
    let resp = send(
        &app,
        "POST",
        "/jobs",
        Some(&admin_token()),
        Some(json!({"title": "new", "salary": "hehehe", "equity": null, "companyHandle": "c1"})),
    )
    .await;
    expect_status(resp, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn create_rejects_equity_above_one() {
    let app = router(lazy_state());
    let resp = send(
        &app,
        "POST",
        "/jobs",
        Some(&admin_token()),
        Some(json!({"title": "new", "equity": "1.5", "companyHandle": "c1"})),
    )
    .await;
    expect_status(resp, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn update_requires_admin() {
    let app = router(lazy_state());
    let anon = send(&app, "PATCH", "/jobs/1", None, Some(json!({"salary": 500}))).await;
    expect_status(anon, StatusCode::UNAUTHORIZED).await;

    let user = send(&app, "PATCH", "/jobs/1", Some(&user_token()), Some(json!({"salary": 500}))).await;
    expect_status(user, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn forged_token_is_anonymous() {
    let app = router(lazy_state());
    let forged = jobly::create_token("u2", true, "some-other-secret").unwrap();
    let resp = send(&app, "PATCH", "/jobs/1", Some(&forged), Some(json!({"salary": 500}))).await;
    expect_status(resp, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn update_rejects_id_and_company_changes() {
    let app = router(lazy_state());
    let token = admin_token();
    for body in [json!({"companyHandle": "c3"}), json!({"id": 7})] {
        let resp = send(&app, "PATCH", "/jobs/1", Some(&token), Some(body)).await;
        expect_status(resp, StatusCode::BAD_REQUEST).await;
    }
}

#[tokio::test]
async fn update_rejects_invalid_data() {
    let app = router(lazy_state());
    let resp = send(&app, "PATCH", "/jobs/1", Some(&admin_token()), Some(json!({"salary": "hehehe"}))).await;
    expect_status(resp, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn update_with_empty_body_is_bad_request() {
    let app = router(lazy_state());
    let resp = send(&app, "PATCH", "/jobs/0", Some(&admin_token()), Some(json!({}))).await;
    let body = expect_status(resp, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"]["message"], "No data");
}

#[tokio::test]
async fn delete_requires_admin() {
    let app = router(lazy_state());
    expect_status(send(&app, "DELETE", "/jobs/1", None, None).await, StatusCode::UNAUTHORIZED).await;
    expect_status(
        send(&app, "DELETE", "/jobs/1", Some(&user_token()), None).await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = router(lazy_state());
    expect_status(send(&app, "GET", "/jobs/abc", None, None).await, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn list_rejects_bad_filters() {
    let app = router(lazy_state());
    for uri in ["/jobs?minSalary=lots", "/jobs?hasEquity=maybe", "/jobs?companyHandle=c1"] {
        expect_status(send(&app, "GET", uri, None, None).await, StatusCode::BAD_REQUEST).await;
    }
}

#[tokio::test]
async fn malformed_json_is_json_bad_request() {
    let app = router(lazy_state());
    let admin = admin_token();
    let body = r#"{"title": "new", "companyHandle": "c1""#;

    for (method, uri) in [("POST", "/jobs"), ("PATCH", "/jobs/1")] {
        let resp = send_raw(&app, method, uri, Some(&admin), Some("application/json"), body).await;
        let err = expect_status(resp, StatusCode::BAD_REQUEST).await;
        assert_eq!(err["error"]["code"], "bad_request");
        assert_eq!(err["error"]["status"], 400);
    }
}

#[tokio::test]
async fn missing_content_type_is_json_bad_request() {
    let app = router(lazy_state());
    let body = json!({"title": "new", "companyHandle": "c1"}).to_string();
    let resp = send_raw(&app, "POST", "/jobs", Some(&admin_token()), None, &body).await;
    let err = expect_status(resp, StatusCode::BAD_REQUEST).await;
    assert_eq!(err["error"]["code"], "bad_request");
}

#[tokio::test]
async fn non_object_body_is_bad_request() {
    let app = router(lazy_state());
    let resp = send(&app, "PATCH", "/jobs/1", Some(&admin_token()), Some(json!(["title"]))).await;
    let err = expect_status(resp, StatusCode::BAD_REQUEST).await;
    assert_eq!(err["error"]["message"], "body must be a JSON object");
}
