//! Entity persistence
//!
//! Create/read/delete operations over departments, employees, attendance,
//! performance reviews and salaries. Constraint violations (duplicate
//! attendance day, unknown department, ...) surface as `Error::Database`.

use hr_common::db::{
    Department, Employee, NewAttendance, NewDepartment, NewEmployee, NewPerformanceReview,
    NewSalary,
};
use hr_common::{money, Error, Result};
use sqlx::{Executor, Sqlite};

pub(crate) const DEPARTMENT_COLUMNS: &str = "id, name, location, manager_id";

pub(crate) const EMPLOYEE_COLUMNS: &str =
    "id, first_name, last_name, email, phone_number, hire_date, position, department_id, is_active";

pub async fn insert_department<'e, E>(executor: E, department: &NewDepartment) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO departments (name, location) VALUES (?, ?)")
        .bind(&department.name)
        .bind(&department.location)
        .execute(executor)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Assign (or clear) the department manager
pub async fn set_department_manager<'e, E>(
    executor: E,
    department_id: i64,
    manager_id: Option<i64>,
) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE departments SET manager_id = ? WHERE id = ?")
        .bind(manager_id)
        .bind(department_id)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Department {}", department_id)));
    }

    Ok(())
}

pub async fn insert_employee<'e, E>(executor: E, employee: &NewEmployee) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO employees (
            first_name, last_name, email, phone_number, hire_date, position,
            department_id, is_active
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(&employee.email)
    .bind(&employee.phone_number)
    .bind(employee.hire_date)
    .bind(&employee.position)
    .bind(employee.department_id)
    .bind(employee.is_active)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn insert_attendance<'e, E>(executor: E, attendance: &NewAttendance) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, clock_in, clock_out, status, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(attendance.employee_id)
    .bind(attendance.date)
    .bind(attendance.clock_in)
    .bind(attendance.clock_out)
    .bind(attendance.status)
    .bind(&attendance.notes)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn insert_performance<'e, E>(
    executor: E,
    review: &NewPerformanceReview,
) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    if !(1..=5).contains(&review.rating) {
        return Err(Error::InvalidInput(format!(
            "Rating must be between 1 and 5, got {}",
            review.rating
        )));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO performance_reviews (
            employee_id, review_date, reviewer_id, rating, comments, goals_met,
            improvement_areas, strengths
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(review.employee_id)
    .bind(review.review_date)
    .bind(review.reviewer_id)
    .bind(review.rating)
    .bind(&review.comments)
    .bind(review.goals_met)
    .bind(&review.improvement_areas)
    .bind(&review.strengths)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn insert_salary<'e, E>(executor: E, salary: &NewSalary) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let amount_cents = money::to_cents(salary.amount)?;
    let bonus_cents = money::to_cents(salary.bonus)?;

    let result = sqlx::query(
        r#"
        INSERT INTO salaries (
            employee_id, amount_cents, bonus_cents, effective_date, salary_type,
            currency, notes
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(salary.employee_id)
    .bind(amount_cents)
    .bind(bonus_cents)
    .bind(salary.effective_date)
    .bind(&salary.salary_type)
    .bind(&salary.currency)
    .bind(&salary.notes)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Delete an employee; returns false if no such employee existed
///
/// Attendance, salary and reviews-as-subject go with the employee; manager
/// and reviewer references elsewhere are nulled by the schema.
pub async fn delete_employee<'e, E>(executor: E, employee_id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(employee_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_department<'e, E>(executor: E, department_id: i64) -> Result<Option<Department>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let department = sqlx::query_as::<_, Department>(&format!(
        "SELECT {} FROM departments WHERE id = ?",
        DEPARTMENT_COLUMNS
    ))
    .bind(department_id)
    .fetch_optional(executor)
    .await?;

    Ok(department)
}

pub async fn get_employee<'e, E>(executor: E, employee_id: i64) -> Result<Option<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {} FROM employees WHERE id = ?",
        EMPLOYEE_COLUMNS
    ))
    .bind(employee_id)
    .fetch_optional(executor)
    .await?;

    Ok(employee)
}
