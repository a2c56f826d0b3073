//! HTTP API handlers for hr-analytics
//!
//! Every handler is a read-only `GET` that validates its scope parameters
//! and delegates to `analytics::service`.

use chrono::{NaiveDate, Utc};

pub mod attendance;
pub mod auth;
pub mod departments;
pub mod docs;
pub mod employees;
pub mod error;
pub mod health;
pub mod params;
pub mod performance;
pub mod rate_limit;
pub mod salaries;

pub use auth::auth_middleware;
pub use docs::docs_routes;
pub use error::{ApiError, ApiResult};
pub use health::health_routes;
pub use rate_limit::{rate_limit_middleware, RateLimiter};

/// Reference date for "current" salary selection
fn today() -> NaiveDate {
    Utc::now().date_naive()
}
