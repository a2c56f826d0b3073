//! hr-analytics library - HR record analytics service
//!
//! Read-side analytics over departments, employees, attendance, performance
//! reviews and salary history, served over HTTP.

use axum::Router;
use hr_common::config::DEFAULT_RATE_LIMIT;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use api::RateLimiter;

pub mod analytics;
pub mod api;
pub mod db;
pub mod seed;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Shared secret for API authentication (0 disables checking)
    pub shared_secret: i64,
    /// Per-client request budget for `/api` routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(db: SqlitePool, shared_secret: i64) -> Self {
        Self {
            db,
            shared_secret,
            rate_limiter: RateLimiter::new(DEFAULT_RATE_LIMIT),
        }
    }

    /// Replace the request budget (requests per client per minute, 0 = unlimited)
    pub fn with_rate_limit(mut self, max_per_minute: u32) -> Self {
        self.rate_limiter = RateLimiter::new(max_per_minute);
        self
    }
}

/// Build application router
///
/// `/health` and the API docs are public; everything under `/api` is
/// throttled per client, then authenticated.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    let protected = Router::new()
        .route(
            "/api/departments/analytics",
            get(api::departments::department_analytics),
        )
        .route(
            "/api/employees/:id/attendance_analytics",
            get(api::employees::attendance_analytics),
        )
        .route(
            "/api/employees/:id/performance_trend",
            get(api::employees::performance_trend),
        )
        .route(
            "/api/employees/:id/salary_growth",
            get(api::employees::salary_growth),
        )
        .route(
            "/api/attendance/status_summary",
            get(api::attendance::status_summary),
        )
        .route(
            "/api/attendance/department_attendance",
            get(api::attendance::department_attendance),
        )
        .route(
            "/api/performance/rating_distribution",
            get(api::performance::rating_distribution),
        )
        .route(
            "/api/performance/department_performance",
            get(api::performance::department_performance),
        )
        .route(
            "/api/salaries/salary_stats",
            get(api::salaries::salary_stats),
        )
        .route(
            "/api/salaries/department_salaries",
            get(api::salaries::department_salaries),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::rate_limit_middleware,
        ));

    let public = Router::new()
        .merge(api::health_routes())
        .merge(api::docs_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
