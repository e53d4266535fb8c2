// SPDX-License-Identifier: MIT

//! Fixed-window rate limiting for the authentication routes.
//!
//! Windows are tracked per client IP in a `DashMap`. A single server
//! process serves all traffic, so in-memory counters are sufficient.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Per-IP fixed-window counter.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<IpAddr, Window>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max_requests,
            window,
        }
    }

    /// Record a hit for `ip` and report whether it is still within budget.
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();

        // Sweep expired windows so the map never accumulates an entry
        // per client IP ever seen. Must happen before taking the entry
        // guard below: retain and an outstanding guard on the same shard
        // would deadlock.
        self.windows
            .retain(|_, window| now.duration_since(window.started) < self.window);

        let mut entry = self.windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });

        entry.count += 1;
        entry.count <= self.max_requests
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

/// Middleware limiting login/register attempts per client IP.
pub async fn limit_auth_attempts(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Tests drive the router without a socket; treat those as one client.
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |info| info.0.ip());

    if !state.auth_limiter.check(ip) {
        tracing::warn!(client_ip = %ip, "Rate limit exceeded on auth route");
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IP_A: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    const IP_B: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

    #[test]
    fn test_allows_up_to_max_then_blocks() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));

        assert!(limiter.check(IP_A));
        assert!(limiter.check(IP_A));
        assert!(limiter.check(IP_A));
        assert!(!limiter.check(IP_A));
    }

    #[test]
    fn test_counters_are_per_ip() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));

        assert!(limiter.check(IP_A));
        assert!(!limiter.check(IP_A));
        assert!(limiter.check(IP_B));
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_millis(0));

        // A zero-length window expires immediately, so every hit starts fresh.
        assert!(limiter.check(IP_A));
        assert!(limiter.check(IP_A));
    }

    #[test]
    fn test_expired_windows_are_evicted() {
        let limiter = RateLimiter::new(1, Duration::from_millis(10));

        assert!(limiter.check(IP_A));
        assert_eq!(limiter.tracked_clients(), 1);

        std::thread::sleep(Duration::from_millis(20));

        // The next hit sweeps the stale entry before recording its own
        assert!(limiter.check(IP_B));
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
