//! Tests for database initialization and schema constraints
//!
//! Covers:
//! - Automatic database creation and idempotent re-open
//! - Foreign-key actions (cascade for owned rows, set-null for references)
//! - CHECK / UNIQUE constraints on attendance and reviews
//! - Shared secret bootstrap in the settings table

use hr_common::api::auth::{load_shared_secret, store_shared_secret};
use hr_common::db::init::init_database;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn fresh_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("hr.db"))
        .await
        .expect("Database initialization failed");
    (dir, pool)
}

async fn seed_department_and_employees(pool: &SqlitePool) {
    sqlx::query("INSERT INTO departments (id, name, location) VALUES (1, 'Engineering', 'Austin')")
        .execute(pool)
        .await
        .unwrap();

    for (id, email) in [(1, "ada@example.com"), (2, "grace@example.com")] {
        sqlx::query(
            "INSERT INTO employees (id, first_name, last_name, email, hire_date, position, department_id)
             VALUES (?, 'First', 'Last', ?, '2020-01-01', 'Developer', 1)",
        )
        .bind(id)
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("hr.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_idempotent_initialization() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("hr.db");

    let pool1 = init_database(&db_path).await.unwrap();
    seed_department_and_employees(&pool1).await;
    drop(pool1);

    let pool2 = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(&pool2)
        .await
        .unwrap();
    assert_eq!(count, 2, "Re-opening must not drop existing rows");

    let versions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
        .fetch_one(&pool2)
        .await
        .unwrap();
    assert_eq!(versions, 1);
}

#[tokio::test]
async fn test_employee_delete_cascades_owned_rows() {
    let (_dir, pool) = fresh_db().await;
    seed_department_and_employees(&pool).await;

    sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (1, '2024-01-02', 'present')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO salaries (employee_id, amount_cents, effective_date) VALUES (1, 5000000, '2024-01-01')",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO performance_reviews (employee_id, review_date, reviewer_id, rating) VALUES (1, '2024-06-01', 2, 4)",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("DELETE FROM employees WHERE id = 1")
        .execute(&pool)
        .await
        .unwrap();

    for table in ["attendance", "salaries", "performance_reviews"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0, "{} rows should cascade with their employee", table);
    }
}

#[tokio::test]
async fn test_reviewer_and_manager_delete_sets_null() {
    let (_dir, pool) = fresh_db().await;
    seed_department_and_employees(&pool).await;

    sqlx::query("UPDATE departments SET manager_id = 2 WHERE id = 1")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO performance_reviews (employee_id, review_date, reviewer_id, rating) VALUES (1, '2024-06-01', 2, 4)",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("DELETE FROM employees WHERE id = 2")
        .execute(&pool)
        .await
        .unwrap();

    let manager: Option<i64> = sqlx::query_scalar("SELECT manager_id FROM departments WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(manager, None);

    let reviewer: Option<i64> =
        sqlx::query_scalar("SELECT reviewer_id FROM performance_reviews WHERE employee_id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(reviewer, None, "Review must survive with a nulled reviewer");
}

#[tokio::test]
async fn test_attendance_unique_per_employee_and_date() {
    let (_dir, pool) = fresh_db().await;
    seed_department_and_employees(&pool).await;

    let insert = "INSERT INTO attendance (employee_id, date, status) VALUES (1, '2024-01-02', ?)";
    sqlx::query(insert).bind("present").execute(&pool).await.unwrap();
    let duplicate = sqlx::query(insert).bind("late").execute(&pool).await;

    assert!(duplicate.is_err(), "Second attendance row for the same day must be rejected");
}

#[tokio::test]
async fn test_rating_and_status_checks() {
    let (_dir, pool) = fresh_db().await;
    seed_department_and_employees(&pool).await;

    let bad_rating = sqlx::query(
        "INSERT INTO performance_reviews (employee_id, review_date, rating) VALUES (1, '2024-06-01', 6)",
    )
    .execute(&pool)
    .await;
    assert!(bad_rating.is_err());

    let bad_status =
        sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (1, '2024-01-03', 'holiday')")
            .execute(&pool)
            .await;
    assert!(bad_status.is_err());
}

#[tokio::test]
async fn test_shared_secret_generated_once() {
    let (_dir, pool) = fresh_db().await;

    let first = load_shared_secret(&pool).await.unwrap();
    let second = load_shared_secret(&pool).await.unwrap();

    assert_ne!(first, 0);
    assert_eq!(first, second, "Secret must be persisted, not regenerated");

    store_shared_secret(&pool, 0).await.unwrap();
    assert_eq!(load_shared_secret(&pool).await.unwrap(), 0);
}
