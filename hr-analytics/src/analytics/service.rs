//! Database-backed analytics operations
//!
//! Each function opens one read transaction, loads the rows it needs through
//! the scoped loaders and hands them to the engine. Missing employees,
//! departments or salary data come back as `Error::NotFound` carrying the
//! client-facing message.

use chrono::NaiveDate;
use hr_common::db::{Department, Employee};
use hr_common::{Error, Result};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use super::engine::{
    self, AttendanceAnalytics, DepartmentAnalytics, DepartmentPerformance, DepartmentSalaries,
    PerformanceTrend, RatingCount, SalaryGrowth, SalaryStats, StatusCount,
};
use crate::db::{self, Scope};

pub const EMPLOYEE_NOT_FOUND: &str = "Employee not found";
pub const DEPARTMENT_NOT_FOUND: &str = "Department not found";
pub const SALARY_DATA_NOT_AVAILABLE: &str = "Salary data not available";

async fn require_employee(conn: &mut SqliteConnection, employee_id: i64) -> Result<Employee> {
    db::get_employee(conn, employee_id)
        .await?
        .ok_or_else(|| Error::NotFound(EMPLOYEE_NOT_FOUND.to_string()))
}

async fn require_department(conn: &mut SqliteConnection, department_id: i64) -> Result<Department> {
    db::get_department(conn, department_id)
        .await?
        .ok_or_else(|| Error::NotFound(DEPARTMENT_NOT_FOUND.to_string()))
}

/// Resolve an optional department filter to a load scope, checking it exists
async fn department_scope(conn: &mut SqliteConnection, department_id: Option<i64>) -> Result<Scope> {
    match department_id {
        Some(id) => {
            require_department(conn, id).await?;
            Ok(Scope::Department(id))
        }
        None => Ok(Scope::All),
    }
}

pub async fn department_analytics(pool: &SqlitePool, as_of: NaiveDate) -> Result<Vec<DepartmentAnalytics>> {
    let mut tx = pool.begin().await?;

    let departments = db::load_departments(&mut *tx, Scope::All).await?;
    let employees = db::load_employees(&mut *tx, Scope::All).await?;
    let salaries = db::load_salaries(&mut *tx, Scope::All).await?;

    tx.commit().await?;

    Ok(engine::department_analytics(&departments, &employees, &salaries, as_of))
}

pub async fn attendance_analytics(pool: &SqlitePool, employee_id: i64) -> Result<AttendanceAnalytics> {
    let mut tx = pool.begin().await?;

    let employee = require_employee(&mut tx, employee_id).await?;
    let attendance = db::load_attendance(&mut *tx, Scope::Employee(employee_id)).await?;

    tx.commit().await?;

    Ok(engine::attendance_analytics(&employee, &attendance))
}

pub async fn performance_trend(pool: &SqlitePool, employee_id: i64) -> Result<PerformanceTrend> {
    let mut tx = pool.begin().await?;

    let employee = require_employee(&mut tx, employee_id).await?;
    let reviews = db::load_performance(&mut *tx, Scope::Employee(employee_id)).await?;

    tx.commit().await?;

    Ok(engine::performance_trend(&employee, &reviews))
}

pub async fn salary_growth(pool: &SqlitePool, employee_id: i64, as_of: NaiveDate) -> Result<SalaryGrowth> {
    let mut tx = pool.begin().await?;

    let employee = require_employee(&mut tx, employee_id).await?;
    let salaries = db::load_salaries(&mut *tx, Scope::Employee(employee_id)).await?;

    tx.commit().await?;

    engine::salary_growth(&employee, &salaries, as_of).ok_or_else(|| {
        debug!("No salary in effect for {} ({}) on {}", employee.full_name(), employee_id, as_of);
        Error::NotFound(SALARY_DATA_NOT_AVAILABLE.to_string())
    })
}

pub async fn status_summary(pool: &SqlitePool, department_id: Option<i64>) -> Result<Vec<StatusCount>> {
    let mut tx = pool.begin().await?;

    let scope = department_scope(&mut tx, department_id).await?;
    let attendance = db::load_attendance(&mut *tx, scope).await?;

    tx.commit().await?;

    Ok(engine::status_summary(&attendance))
}

pub async fn rating_distribution(pool: &SqlitePool, department_id: Option<i64>) -> Result<Vec<RatingCount>> {
    let mut tx = pool.begin().await?;

    let scope = department_scope(&mut tx, department_id).await?;
    let reviews = db::load_performance(&mut *tx, scope).await?;

    tx.commit().await?;

    Ok(engine::rating_distribution(&reviews))
}

/// Review rollup for one department, or every department when unscoped
pub async fn department_performance(
    pool: &SqlitePool,
    department_id: Option<i64>,
) -> Result<Vec<DepartmentPerformance>> {
    let mut tx = pool.begin().await?;

    let scope = department_scope(&mut tx, department_id).await?;
    let departments = db::load_departments(&mut *tx, scope).await?;
    let employees = db::load_employees(&mut *tx, scope).await?;
    let reviews = db::load_performance(&mut *tx, scope).await?;

    tx.commit().await?;

    Ok(engine::department_performance(&departments, &employees, &reviews))
}

pub async fn salary_stats(pool: &SqlitePool, as_of: NaiveDate) -> Result<SalaryStats> {
    let mut tx = pool.begin().await?;
    let salaries = db::load_salaries(&mut *tx, Scope::All).await?;
    tx.commit().await?;

    Ok(engine::salary_stats(&salaries, as_of))
}

pub async fn department_salaries(
    pool: &SqlitePool,
    department_id: i64,
    as_of: NaiveDate,
) -> Result<Vec<DepartmentSalaries>> {
    let mut tx = pool.begin().await?;

    let department = require_department(&mut tx, department_id).await?;
    let scope = Scope::Department(department_id);
    let employees = db::load_employees(&mut *tx, scope).await?;
    let salaries = db::load_salaries(&mut *tx, scope).await?;

    tx.commit().await?;

    Ok(vec![engine::department_salaries(
        &department,
        &employees,
        &salaries,
        as_of,
    )])
}
