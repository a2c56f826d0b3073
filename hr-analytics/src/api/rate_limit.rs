//! Per-client request throttling for the analytics API
//!
//! Fixed one-minute windows keyed by client address. A budget of 0 turns
//! throttling off.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

use super::error::ApiError;
use crate::AppState;

const WINDOW: Duration = Duration::from_secs(60);

struct ClientWindow {
    count: u32,
    started: Instant,
}

#[derive(Clone)]
pub struct RateLimiter {
    max_per_window: u32,
    window: Duration,
    clients: Arc<Mutex<HashMap<String, ClientWindow>>>,
}

impl RateLimiter {
    pub fn new(max_per_minute: u32) -> Self {
        Self::with_window(max_per_minute, WINDOW)
    }

    fn with_window(max_per_window: u32, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_per_window > 0
    }

    /// Count one request for `client`; `false` once the window's budget is spent
    pub async fn check(&self, client: &str) -> bool {
        if !self.is_enabled() {
            return true;
        }

        let mut clients = self.clients.lock().await;
        let now = Instant::now();
        let window = clients.entry(client.to_owned()).or_insert(ClientWindow {
            count: 0,
            started: now,
        });

        if now.duration_since(window.started) >= self.window {
            window.count = 0;
            window.started = now;
        }

        window.count = window.count.saturating_add(1);
        window.count <= self.max_per_window
    }

    /// Drop windows that have expired
    pub async fn cleanup(&self) {
        let now = Instant::now();
        self.clients
            .lock()
            .await
            .retain(|_, client| now.duration_since(client.started) < self.window);
    }
}

/// First `X-Forwarded-For` entry, then the peer address
fn client_key(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_owned();
    }

    request
        .extensions()
        .get::<ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = client_key(&request);
    if !state.rate_limiter.check(&client).await {
        warn!("Rate limit exceeded for {} on {}", client, request.uri().path());
        return Err(ApiError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http};

    #[tokio::test]
    async fn test_budget_per_client() {
        let limiter = RateLimiter::new(2);

        assert!(limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.1").await);
        assert!(!limiter.check("10.0.0.1").await);

        // Separate budget
        assert!(limiter.check("10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_zero_budget_disables() {
        let limiter = RateLimiter::new(0);
        for _ in 0..100 {
            assert!(limiter.check("10.0.0.1").await);
        }
    }

    #[tokio::test]
    async fn test_window_resets() {
        let window = Duration::from_millis(50);
        let limiter = RateLimiter::with_window(1, window);

        assert!(limiter.check("10.0.0.1").await);
        assert!(!limiter.check("10.0.0.1").await);

        tokio::time::sleep(window).await;
        assert!(limiter.check("10.0.0.1").await);

        tokio::time::sleep(window).await;
        limiter.cleanup().await;
        assert!(limiter.clients.lock().await.is_empty());
    }

    #[test]
    fn test_client_key_prefers_forwarded_header() {
        let request = http::Request::builder()
            .header("x-forwarded-for", " 203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_key(&request), "203.0.113.7");

        let request = http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_key(&request), "unknown");
    }
}
