//! Per-employee analytics

use axum::{extract::State, Json};

use super::error::ApiResult;
use super::params::EmployeeId;
use super::today;
use crate::analytics::{service, AttendanceAnalytics, PerformanceTrend, SalaryGrowth};
use crate::AppState;

/// GET /api/employees/:id/attendance_analytics
pub async fn attendance_analytics(
    State(state): State<AppState>,
    EmployeeId(employee_id): EmployeeId,
) -> ApiResult<Json<AttendanceAnalytics>> {
    Ok(Json(service::attendance_analytics(&state.db, employee_id).await?))
}

/// GET /api/employees/:id/performance_trend
pub async fn performance_trend(
    State(state): State<AppState>,
    EmployeeId(employee_id): EmployeeId,
) -> ApiResult<Json<PerformanceTrend>> {
    Ok(Json(service::performance_trend(&state.db, employee_id).await?))
}

/// GET /api/employees/:id/salary_growth
///
/// 404 when the employee has no salary in effect yet.
pub async fn salary_growth(
    State(state): State<AppState>,
    EmployeeId(employee_id): EmployeeId,
) -> ApiResult<Json<SalaryGrowth>> {
    Ok(Json(
        service::salary_growth(&state.db, employee_id, today()).await?,
    ))
}
