//! Attendance status summaries

use axum::{extract::State, Json};

use super::error::ApiResult;
use super::params::DepartmentQuery;
use crate::analytics::{service, StatusCount};
use crate::AppState;

/// GET /api/attendance/status_summary[?department=]
pub async fn status_summary(
    State(state): State<AppState>,
    query: DepartmentQuery,
) -> ApiResult<Json<Vec<StatusCount>>> {
    let department_id = query.optional()?;
    Ok(Json(service::status_summary(&state.db, department_id).await?))
}

/// GET /api/attendance/department_attendance?department=
pub async fn department_attendance(
    State(state): State<AppState>,
    query: DepartmentQuery,
) -> ApiResult<Json<Vec<StatusCount>>> {
    let department_id = query.required()?;
    Ok(Json(
        service::status_summary(&state.db, Some(department_id)).await?,
    ))
}
