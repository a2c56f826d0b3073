//! Scoped bulk loaders
//!
//! The analytics service calls these against one open read transaction so a
//! request sees a single consistent snapshot of the store. Rows come back in
//! primary-key order.

use hr_common::db::{Attendance, Department, Employee, PerformanceReview, Salary};
use hr_common::Result;
use sqlx::{Executor, Sqlite};
use tracing::debug;

use super::records::{DEPARTMENT_COLUMNS, EMPLOYEE_COLUMNS};
use super::Scope;

/// WHERE clause plus its single bind value for a scope
///
/// `department_column` / `employee_column` name the columns the scope
/// filters on in the query being built.
fn scope_filter(scope: Scope, department_column: &str, employee_column: &str) -> (String, Option<i64>) {
    match scope {
        Scope::All => (String::new(), None),
        Scope::Department(id) => (format!("WHERE {} = ?", department_column), Some(id)),
        Scope::Employee(id) => (format!("WHERE {} = ?", employee_column), Some(id)),
    }
}

pub async fn load_departments<'e, E>(executor: E, scope: Scope) -> Result<Vec<Department>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (filter, bind) = match scope {
        Scope::Employee(id) => (
            "WHERE id = (SELECT department_id FROM employees WHERE employees.id = ?)".to_string(),
            Some(id),
        ),
        _ => scope_filter(scope, "id", "id"),
    };
    let sql = format!(
        "SELECT {} FROM departments {} ORDER BY id",
        DEPARTMENT_COLUMNS, filter
    );

    let mut query = sqlx::query_as::<_, Department>(&sql);
    if let Some(id) = bind {
        query = query.bind(id);
    }

    let rows = query.fetch_all(executor).await?;
    debug!("Loaded {} departments ({:?})", rows.len(), scope);
    Ok(rows)
}

pub async fn load_employees<'e, E>(executor: E, scope: Scope) -> Result<Vec<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (filter, bind) = scope_filter(scope, "department_id", "id");
    let sql = format!(
        "SELECT {} FROM employees {} ORDER BY id",
        EMPLOYEE_COLUMNS, filter
    );

    let mut query = sqlx::query_as::<_, Employee>(&sql);
    if let Some(id) = bind {
        query = query.bind(id);
    }

    let rows = query.fetch_all(executor).await?;
    debug!("Loaded {} employees ({:?})", rows.len(), scope);
    Ok(rows)
}

pub async fn load_attendance<'e, E>(executor: E, scope: Scope) -> Result<Vec<Attendance>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (filter, bind) = scope_filter(scope, "e.department_id", "a.employee_id");
    let sql = format!(
        r#"
        SELECT a.id, a.employee_id, a.date, a.clock_in, a.clock_out, a.status, a.notes
        FROM attendance a
        JOIN employees e ON e.id = a.employee_id
        {}
        ORDER BY a.id
        "#,
        filter
    );

    let mut query = sqlx::query_as::<_, Attendance>(&sql);
    if let Some(id) = bind {
        query = query.bind(id);
    }

    let rows = query.fetch_all(executor).await?;
    debug!("Loaded {} attendance rows ({:?})", rows.len(), scope);
    Ok(rows)
}

pub async fn load_performance<'e, E>(executor: E, scope: Scope) -> Result<Vec<PerformanceReview>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (filter, bind) = scope_filter(scope, "e.department_id", "p.employee_id");
    let sql = format!(
        r#"
        SELECT p.id, p.employee_id, p.review_date, p.reviewer_id, p.rating, p.comments,
               p.goals_met, p.improvement_areas, p.strengths
        FROM performance_reviews p
        JOIN employees e ON e.id = p.employee_id
        {}
        ORDER BY p.id
        "#,
        filter
    );

    let mut query = sqlx::query_as::<_, PerformanceReview>(&sql);
    if let Some(id) = bind {
        query = query.bind(id);
    }

    let rows = query.fetch_all(executor).await?;
    debug!("Loaded {} performance reviews ({:?})", rows.len(), scope);
    Ok(rows)
}

pub async fn load_salaries<'e, E>(executor: E, scope: Scope) -> Result<Vec<Salary>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (filter, bind) = scope_filter(scope, "e.department_id", "s.employee_id");
    let sql = format!(
        r#"
        SELECT s.id, s.employee_id, s.amount_cents, s.bonus_cents, s.effective_date,
               s.salary_type, s.currency, s.notes
        FROM salaries s
        JOIN employees e ON e.id = s.employee_id
        {}
        ORDER BY s.id
        "#,
        filter
    );

    let mut query = sqlx::query_as::<_, Salary>(&sql);
    if let Some(id) = bind {
        query = query.bind(id);
    }

    let rows = query.fetch_all(executor).await?;
    debug!("Loaded {} salary rows ({:?})", rows.len(), scope);
    Ok(rows)
}
