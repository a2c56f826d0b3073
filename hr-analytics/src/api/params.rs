//! Request parameter extraction
//!
//! Both extractors reject with `ApiError::BadRequest`, so a malformed path
//! segment or query string renders the same JSON error body as every other
//! failure instead of axum's plain-text rejection.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::Deserialize;

use super::error::{ApiError, ApiResult};

pub const DEPARTMENT_ID_REQUIRED: &str = "Department ID is required";
pub const INVALID_DEPARTMENT_ID: &str = "Invalid department ID";
pub const INVALID_EMPLOYEE_ID: &str = "Invalid employee ID";

/// `/api/employees/:id/...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EmployeeId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest(INVALID_EMPLOYEE_ID.to_string()))?;
        Ok(EmployeeId(id))
    }
}

/// `?department=<id>`
///
/// Kept as a raw string so a malformed id is reported with our own message
/// instead of the extractor's rejection. Unrelated query fields (the auth
/// `timestamp` and `hash`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct DepartmentQuery {
    pub department: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for DepartmentQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Repeated `department` keys fail here
        let Query(query) = Query::<DepartmentQuery>::try_from_uri(&parts.uri)
            .map_err(|_| ApiError::BadRequest(INVALID_DEPARTMENT_ID.to_string()))?;
        Ok(query)
    }
}

impl DepartmentQuery {
    /// Department filter when present; blank counts as absent
    pub fn optional(&self) -> ApiResult<Option<i64>> {
        match self.department.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ApiError::BadRequest(INVALID_DEPARTMENT_ID.to_string())),
        }
    }

    pub fn required(&self) -> ApiResult<i64> {
        self.optional()?
            .ok_or_else(|| ApiError::BadRequest(DEPARTMENT_ID_REQUIRED.to_string()))
    }
}
