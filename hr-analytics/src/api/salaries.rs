//! Salary statistics

use axum::{extract::State, Json};

use super::error::ApiResult;
use super::params::DepartmentQuery;
use super::today;
use crate::analytics::{service, DepartmentSalaries, SalaryStats};
use crate::AppState;

/// GET /api/salaries/salary_stats
pub async fn salary_stats(State(state): State<AppState>) -> ApiResult<Json<SalaryStats>> {
    Ok(Json(service::salary_stats(&state.db, today()).await?))
}

/// GET /api/salaries/department_salaries?department=
pub async fn department_salaries(
    State(state): State<AppState>,
    query: DepartmentQuery,
) -> ApiResult<Json<Vec<DepartmentSalaries>>> {
    let department_id = query.required()?;
    Ok(Json(
        service::department_salaries(&state.db, department_id, today()).await?,
    ))
}
