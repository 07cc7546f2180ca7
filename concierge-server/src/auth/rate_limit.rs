//! Per-IP fixed-window request limiting (production only)

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::{ApiResponse, AppError, ErrorCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::security_log;

/// How long an idle entry is kept before [`RateLimiter::cleanup`] drops it
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

struct IpEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    /// IP -> entry
    inner: Arc<Mutex<HashMap<String, IpEntry>>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    pub async fn check(&self, ip: &str) -> bool {
        let mut map = self.inner.lock().await;
        let now = Instant::now();

        let entry = map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= self.max_requests
    }

    /// Drop entries whose window ended
    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let now = Instant::now();
        let keep = self.window.max(CLEANUP_INTERVAL);
        map.retain(|_, entry| now.duration_since(entry.window_start) < keep);
    }

    pub async fn tracked_ips(&self) -> usize {
        self.inner.lock().await.len()
    }
}

/// Client IP: X-Forwarded-For header first, then peer address.
fn extract_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
    {
        // First entry is the original client
        if let Some(first) = val.split(',').next() {
            let ip = first.trim();
            if !ip.is_empty() {
                return ip.to_owned();
            }
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

fn too_many_requests() -> Response {
    let err = AppError::new(ErrorCode::TooManyRequests);
    (
        StatusCode::TOO_MANY_REQUESTS,
        axum::Json(ApiResponse::<()>::error(&err)),
    )
        .into_response()
}

pub async fn rate_limit(
    State(state): State<crate::state::AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let ip = extract_ip(&request);
    if !state.rate_limiter.check(&ip).await {
        security_log!(WARN, "rate_limited", ip = %ip, uri = %request.uri());
        return Err(too_many_requests());
    }
    Ok(next.run(request).await)
}
