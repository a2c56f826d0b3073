//! Tests for the synthetic data generator

mod helpers;

use chrono::{Datelike, Weekday};
use hr_analytics::seed::{generate, SeedOptions};
use hr_common::db::{Attendance, Department};
use sqlx::SqlitePool;

use helpers::*;

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

fn options(seed: u64) -> SeedOptions {
    SeedOptions {
        employees: 12,
        departments: 4,
        attendance_days: 14,
        clear: false,
        seed: Some(seed),
    }
}

#[tokio::test]
async fn test_generate_populates_every_table() {
    let (_dir, pool) = setup_test_db().await;
    let today = day(2024, 6, 14);

    let summary = generate(&pool, &options(42), today).await.unwrap();

    assert_eq!(summary.departments, 4);
    assert_eq!(summary.employees, 12);
    assert_eq!(count(&pool, "departments").await, 4);
    assert_eq!(count(&pool, "employees").await, 12);
    assert_eq!(count(&pool, "attendance").await as usize, summary.attendance);
    assert_eq!(count(&pool, "performance_reviews").await as usize, summary.reviews);
    assert_eq!(count(&pool, "salaries").await as usize, summary.salaries);

    // 1-3 reviews and at least one salary row per employee
    assert!(summary.reviews >= 12 && summary.reviews <= 36);
    assert!(summary.salaries >= 12);

    let without_salary: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM employees e WHERE NOT EXISTS (SELECT 1 FROM salaries s WHERE s.employee_id = e.id)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(without_salary, 0);
}

#[tokio::test]
async fn test_attendance_on_weekdays_only() {
    let (_dir, pool) = setup_test_db().await;
    let today = day(2024, 6, 14);

    generate(&pool, &options(7), today).await.unwrap();

    let rows: Vec<Attendance> = sqlx::query_as(
        "SELECT id, employee_id, date, clock_in, clock_out, status, notes FROM attendance",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for row in &rows {
        assert!(!matches!(row.date.weekday(), Weekday::Sat | Weekday::Sun));
        assert!(row.date <= today);
        assert!(row.date >= today - chrono::Duration::days(14));
    }
}

#[tokio::test]
async fn test_salary_history_never_in_future() {
    let (_dir, pool) = setup_test_db().await;
    let today = day(2024, 6, 14);

    generate(&pool, &options(99), today).await.unwrap();

    let future: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM salaries WHERE effective_date > ?")
        .bind(today)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(future, 0);
}

#[tokio::test]
async fn test_each_department_with_staff_has_manager() {
    let (_dir, pool) = setup_test_db().await;

    generate(&pool, &options(3), day(2024, 6, 14)).await.unwrap();

    let departments: Vec<Department> =
        sqlx::query_as("SELECT id, name, location, manager_id FROM departments")
            .fetch_all(&pool)
            .await
            .unwrap();

    for department in departments {
        let staff: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE department_id = ?")
            .bind(department.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(department.manager_id.is_some(), staff > 0, "{}", department.name);
    }
}

#[tokio::test]
async fn test_department_count_capped_and_clear_replaces_data() {
    let (_dir, pool) = setup_test_db().await;
    let today = day(2024, 6, 14);

    let many = SeedOptions {
        departments: 20,
        ..options(1)
    };
    let summary = generate(&pool, &many, today).await.unwrap();
    assert_eq!(summary.departments, 7);

    let again = SeedOptions {
        clear: true,
        ..options(2)
    };
    generate(&pool, &again, today).await.unwrap();
    assert_eq!(count(&pool, "departments").await, 4);
    assert_eq!(count(&pool, "employees").await, 12);
}

#[tokio::test]
async fn test_no_departments_rejected() {
    let (_dir, pool) = setup_test_db().await;

    let result = generate(
        &pool,
        &SeedOptions {
            departments: 0,
            ..options(5)
        },
        day(2024, 6, 14),
    )
    .await;

    assert!(matches!(result, Err(hr_common::Error::InvalidInput(_))));
    assert_eq!(count(&pool, "employees").await, 0);
}

#[tokio::test]
async fn test_out_of_range_attendance_window_rejected() {
    let (_dir, pool) = setup_test_db().await;

    let result = generate(
        &pool,
        &SeedOptions {
            attendance_days: i64::MAX,
            ..options(6)
        },
        day(2024, 6, 14),
    )
    .await;

    assert!(matches!(result, Err(hr_common::Error::InvalidInput(_))));
    assert_eq!(count(&pool, "departments").await, 0);
}
