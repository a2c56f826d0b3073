//! Shared fixtures for hr-analytics integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use hr_analytics::{build_router, db, AppState};
use hr_common::api::{auth::now_millis, query_hash, AuthQuery};
use hr_common::db::{
    init_database, AttendanceStatus, NewAttendance, NewDepartment, NewEmployee,
    NewPerformanceReview, NewSalary,
};
use hr_common::money;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Fresh database in a temp directory; keep the `TempDir` alive for the test
pub async fn setup_test_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("hr.db"))
        .await
        .expect("Should initialize database");
    (dir, pool)
}

/// App with authentication disabled (secret 0)
pub fn setup_app(pool: SqlitePool) -> Router {
    build_router(AppState::new(pool, 0))
}

pub fn setup_app_with_auth(pool: SqlitePool, secret: i64) -> Router {
    build_router(AppState::new(pool, secret))
}

pub fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Append fresh `timestamp`/`hash` query parameters to `path`
pub fn signed_uri(path: &str, secret: i64) -> String {
    let timestamp = now_millis();
    let auth = AuthQuery {
        timestamp,
        hash: query_hash(timestamp, secret),
    };
    let separator = if path.contains('?') { '&' } else { '?' };
    format!(
        "{}{}timestamp={}&hash={}",
        path, separator, auth.timestamp, auth.hash
    )
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app.clone().oneshot(test_request(uri)).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn add_department(pool: &SqlitePool, name: &str) -> i64 {
    db::insert_department(
        pool,
        &NewDepartment {
            name: name.to_string(),
            location: "Boston".to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn add_employee(pool: &SqlitePool, department_id: i64, first_name: &str) -> i64 {
    db::insert_employee(
        pool,
        &NewEmployee {
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}.tester@example.com", first_name.to_lowercase()),
            phone_number: "555-100-2000".to_string(),
            hire_date: day(2019, 3, 1),
            position: "Analyst".to_string(),
            department_id,
            is_active: true,
        },
    )
    .await
    .unwrap()
}

/// Salary row with whole-unit amount and bonus
pub async fn add_salary(pool: &SqlitePool, employee_id: i64, amount: i64, bonus: i64, date: NaiveDate) -> i64 {
    db::insert_salary(
        pool,
        &NewSalary::new(
            employee_id,
            money::from_cents(amount * 100),
            money::from_cents(bonus * 100),
            date,
        ),
    )
    .await
    .unwrap()
}

pub async fn add_attendance(pool: &SqlitePool, employee_id: i64, date: NaiveDate, status: AttendanceStatus) {
    db::insert_attendance(
        pool,
        &NewAttendance {
            employee_id,
            date,
            clock_in: None,
            clock_out: None,
            status,
            notes: String::new(),
        },
    )
    .await
    .unwrap();
}

pub async fn add_review(
    pool: &SqlitePool,
    employee_id: i64,
    reviewer_id: Option<i64>,
    rating: i64,
    goals_met: bool,
) -> i64 {
    db::insert_performance(
        pool,
        &NewPerformanceReview {
            employee_id,
            review_date: day(2023, 11, 15),
            reviewer_id,
            rating,
            comments: "Quarterly review".to_string(),
            goals_met,
            improvement_areas: String::new(),
            strengths: String::new(),
        },
    )
    .await
    .unwrap()
}
