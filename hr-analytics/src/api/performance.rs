//! Review rating distribution and department rollups

use axum::{extract::State, Json};

use super::error::ApiResult;
use super::params::DepartmentQuery;
use crate::analytics::{service, DepartmentPerformance, RatingCount};
use crate::AppState;

/// GET /api/performance/rating_distribution[?department=]
pub async fn rating_distribution(
    State(state): State<AppState>,
    query: DepartmentQuery,
) -> ApiResult<Json<Vec<RatingCount>>> {
    let department_id = query.optional()?;
    Ok(Json(
        service::rating_distribution(&state.db, department_id).await?,
    ))
}

/// GET /api/performance/department_performance?department=
pub async fn department_performance(
    State(state): State<AppState>,
    query: DepartmentQuery,
) -> ApiResult<Json<Vec<DepartmentPerformance>>> {
    let department_id = query.required()?;
    Ok(Json(
        service::department_performance(&state.db, Some(department_id)).await?,
    ))
}
