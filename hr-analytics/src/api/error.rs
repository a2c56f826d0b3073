//! Error types for the analytics API
//!
//! Every failure renders as `{"error": "<message>"}`. Store failures are
//! logged in full and reported to the client generically.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hr_common::api::ErrorResponse;
use thiserror::Error;
use tracing::error;

pub const TOO_MANY_REQUESTS: &str = "Too many requests, try again later";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request parameter (400)
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid credentials (403)
    #[error("{0}")]
    Forbidden(String),

    /// Client exceeded its request budget (429)
    #[error("Too many requests, try again later")]
    TooManyRequests,

    /// hr-common error; `NotFound` and `InvalidInput` keep their message
    #[error(transparent)]
    Common(#[from] hr_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::TooManyRequests => (StatusCode::TOO_MANY_REQUESTS, TOO_MANY_REQUESTS.to_string()),
            ApiError::Common(hr_common::Error::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
            ApiError::Common(hr_common::Error::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Common(err) => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ApiError::TooManyRequests, StatusCode::TOO_MANY_REQUESTS),
            (
                ApiError::from(hr_common::Error::NotFound("Employee not found".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(hr_common::Error::InvalidInput("bad".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(hr_common::Error::Config("bad".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
