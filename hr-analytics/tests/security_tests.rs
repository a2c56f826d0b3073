//! Security tests for hr-analytics
//!
//! Tests the timestamp + hash authentication layer:
//! - Protected routes answer 403 without valid credentials
//! - A correctly signed request passes
//! - Stale timestamps and wrong hashes are rejected
//! - Secret 0 disables checking
//! - /health never requires credentials

mod helpers;

use axum::http::StatusCode;
use hr_common::api::{auth::now_millis, query_hash};

use helpers::*;

const SECRET: i64 = 987_654_321;

#[tokio::test]
async fn test_missing_credentials_forbidden() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app_with_auth(pool, SECRET);

    let (status, body) = get_json(&app, "/api/salaries/salary_stats").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("timestamp"));
}

#[tokio::test]
async fn test_missing_hash_forbidden() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app_with_auth(pool, SECRET);

    let uri = format!("/api/salaries/salary_stats?timestamp={}", now_millis());
    let (status, body) = get_json(&app, &uri).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("hash"));
}

#[tokio::test]
async fn test_signed_request_accepted() {
    let (_dir, pool) = setup_test_db().await;
    let dept = add_department(&pool, "Engineering").await;
    let app = setup_app_with_auth(pool, SECRET);

    let (status, _) = get_json(&app, &signed_uri("/api/salaries/salary_stats", SECRET)).await;
    assert_eq!(status, StatusCode::OK);

    // Auth parameters coexist with the department filter
    let uri = signed_uri(
        &format!("/api/attendance/department_attendance?department={}", dept),
        SECRET,
    );
    let (status, _) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_secret_forbidden() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app_with_auth(pool, SECRET);

    let (status, body) = get_json(&app, &signed_uri("/api/departments/analytics", SECRET + 1)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid hash");
}

#[tokio::test]
async fn test_stale_timestamp_forbidden() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app_with_auth(pool, SECRET);

    let stale = now_millis() - 60_000;
    let uri = format!(
        "/api/departments/analytics?timestamp={}&hash={}",
        stale,
        query_hash(stale, SECRET)
    );
    let (status, body) = get_json(&app, &uri).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid timestamp"));
}

#[tokio::test]
async fn test_non_numeric_timestamp_forbidden() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app_with_auth(pool, SECRET);

    let (status, _) = get_json(&app, "/api/departments/analytics?timestamp=soon&hash=abc").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_zero_secret_disables_auth() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app_with_auth(pool, 0);

    let (status, _) = get_json(&app, "/api/departments/analytics").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_open_with_auth_enabled() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app_with_auth(pool, SECRET);

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_every_protected_route_requires_auth() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app_with_auth(pool, SECRET);

    let routes = [
        "/api/departments/analytics",
        "/api/employees/1/attendance_analytics",
        "/api/employees/1/performance_trend",
        "/api/employees/1/salary_growth",
        "/api/attendance/status_summary",
        "/api/attendance/department_attendance?department=1",
        "/api/performance/rating_distribution",
        "/api/performance/department_performance?department=1",
        "/api/salaries/salary_stats",
        "/api/salaries/department_salaries?department=1",
    ];

    for route in routes {
        let (status, _) = get_json(&app, route).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", route);
    }
}
