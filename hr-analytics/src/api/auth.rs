//! Authentication middleware for the analytics API
//!
//! Protected routes are all `GET`, so credentials travel as `timestamp` and
//! `hash` query parameters. Any failure is answered with 403.

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use hr_common::api::{validate_query_auth, validate_timestamp, ApiAuthError};
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
struct AuthParams {
    timestamp: Option<String>,
    hash: Option<String>,
}

fn check_credentials(request: &Request, shared_secret: i64) -> Result<(), ApiAuthError> {
    let Query(params) = Query::<AuthParams>::try_from_uri(request.uri()).unwrap_or_default();

    let timestamp = params
        .timestamp
        .ok_or(ApiAuthError::MissingTimestamp)?
        .parse::<i64>()
        .map_err(|_| ApiAuthError::InvalidTimestamp {
            timestamp: 0,
            now: 0,
            reason: "not an integer".to_string(),
        })?;
    let hash = params.hash.ok_or(ApiAuthError::MissingHash)?;

    validate_timestamp(timestamp)?;
    validate_query_auth(timestamp, &hash, shared_secret)
}

/// Reject requests without a valid timestamp/hash pair
///
/// Secret 0 disables checking entirely.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.shared_secret == 0 {
        return Ok(next.run(request).await);
    }

    if let Err(e) = check_credentials(&request, state.shared_secret) {
        match &e {
            ApiAuthError::InvalidHash { provided, calculated } => {
                warn!(
                    "Hash validation failed for {}: provided={}, calculated={}",
                    request.uri().path(),
                    provided,
                    calculated
                );
            }
            other => debug!("Rejected {}: {}", request.uri().path(), other),
        }
        return Err(ApiError::Forbidden(e.to_string()));
    }

    Ok(next.run(request).await)
}
