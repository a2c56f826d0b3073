//! Department roster analytics

use axum::{extract::State, Json};

use super::error::ApiResult;
use super::today;
use crate::analytics::{service, DepartmentAnalytics};
use crate::AppState;

/// GET /api/departments/analytics
pub async fn department_analytics(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DepartmentAnalytics>>> {
    let analytics = service::department_analytics(&state.db, today()).await?;
    Ok(Json(analytics))
}
