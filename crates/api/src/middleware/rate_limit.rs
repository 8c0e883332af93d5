//! Per-IP throttling of the public auth endpoints.
//!
//! | Endpoint                 | Budget per client IP |
//! |--------------------------|----------------------|
//! | `POST /login`            | 10 per 15 minutes    |
//! | `POST /forgot-password`  | 5 per hour           |
//!
//! Each budget is a GCRA bucket: the full allowance is available as a burst
//! and one attempt comes back every `window / max`. Over budget the request
//! is rejected with 429 and a `Retry-After` header before the body is read.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::time::Duration;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::error::AppError;
use crate::state::AppState;

const LOGIN_MAX_ATTEMPTS: u32 = 10;
const LOGIN_WINDOW: Duration = Duration::from_secs(15 * 60);

const FORGOT_PASSWORD_MAX_ATTEMPTS: u32 = 5;
const FORGOT_PASSWORD_WINDOW: Duration = Duration::from_secs(60 * 60);

pub const LOGIN_LIMIT_MESSAGE: &str = "Too many attempts. Please try again after 15 minutes.";
pub const FORGOT_PASSWORD_LIMIT_MESSAGE: &str =
    "Too many password reset requests. Please try again after 1 hour.";

/// One bucket per client IP.
pub type IpRateLimiter = DefaultKeyedRateLimiter<IpAddr>;

/// The limiters behind [`LoginThrottle`] and [`ForgotPasswordThrottle`].
pub struct AuthRateLimits {
    pub login: IpRateLimiter,
    pub forgot_password: IpRateLimiter,
}

impl AuthRateLimits {
    pub fn new() -> Self {
        Self {
            login: keyed(LOGIN_MAX_ATTEMPTS, LOGIN_WINDOW),
            forgot_password: keyed(FORGOT_PASSWORD_MAX_ATTEMPTS, FORGOT_PASSWORD_WINDOW),
        }
    }

    /// Drop buckets that have refilled completely. Called periodically so
    /// one-off clients do not accumulate.
    pub fn retain_recent(&self) {
        self.login.retain_recent();
        self.forgot_password.retain_recent();
    }
}

impl Default for AuthRateLimits {
    fn default() -> Self {
        Self::new()
    }
}

fn keyed(max: u32, window: Duration) -> IpRateLimiter {
    let burst = NonZeroU32::new(max).unwrap_or(NonZeroU32::MIN);
    let quota = Quota::with_period(window / burst.get())
        .unwrap_or_else(|| Quota::per_minute(burst))
        .allow_burst(burst);
    RateLimiter::keyed(quota)
}

/// Count one attempt for `ip`, or reject with the seconds until the next
/// attempt is allowed.
fn admit(limiter: &IpRateLimiter, ip: IpAddr, message: &'static str) -> Result<(), AppError> {
    limiter.check_key(&ip).map_err(|not_until| {
        let retry_after_secs = not_until
            .wait_time_from(DefaultClock::default().now())
            .as_secs()
            .max(1);
        tracing::warn!(%ip, retry_after_secs, "Auth rate limit exceeded");
        AppError::TooManyRequests {
            message: message.to_string(),
            retry_after_secs,
        }
    })
}

/// The address the limit is keyed on.
///
/// `X-Forwarded-For` (first hop) and `X-Real-IP` are honoured only when
/// `trust_proxy` is set; otherwise a client could pick its own bucket. With
/// no peer address (e.g. a router driven without `ConnectInfo`) every
/// request shares the unspecified address.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> IpAddr {
    if trust_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|first| first.trim().parse().ok());
        if let Some(ip) = forwarded {
            return ip;
        }
        let real_ip = headers
            .get("x-real-ip")
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        if let Some(ip) = real_ip {
            return ip;
        }
    }
    peer.map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn request_ip(parts: &Parts, state: &AppState) -> IpAddr {
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    client_ip(&parts.headers, peer, state.config.trust_proxy)
}

/// Spends one login attempt for the caller's IP. Place it before the body
/// extractor so malformed bodies are counted too.
pub struct LoginThrottle;

impl FromRequestParts<AppState> for LoginThrottle {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ip = request_ip(parts, state);
        admit(&state.rate_limits.login, ip, LOGIN_LIMIT_MESSAGE)?;
        Ok(LoginThrottle)
    }
}

/// Spends one forgot-password request for the caller's IP.
pub struct ForgotPasswordThrottle;

impl FromRequestParts<AppState> for ForgotPasswordThrottle {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ip = request_ip(parts, state);
        admit(
            &state.rate_limits.forgot_password,
            ip,
            FORGOT_PASSWORD_LIMIT_MESSAGE,
        )?;
        Ok(ForgotPasswordThrottle)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn peer() -> Option<SocketAddr> {
        Some("203.0.113.7:51000".parse().unwrap())
    }

    fn forwarded() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.4, 10.0.0.1"));
        headers
    }

    #[test]
    fn forwarded_header_ignored_unless_proxy_trusted() {
        let ip = client_ip(&forwarded(), peer(), false);
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn trusted_proxy_uses_first_forwarded_hop() {
        let ip = client_ip(&forwarded(), peer(), true);
        assert_eq!(ip, "198.51.100.4".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn real_ip_header_used_when_forwarded_for_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("192.0.2.9"));
        let ip = client_ip(&headers, None, true);
        assert_eq!(ip, "192.0.2.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn missing_peer_falls_back_to_unspecified() {
        let ip = client_ip(&HeaderMap::new(), None, false);
        assert!(ip.is_unspecified());
    }

    #[test]
    fn forgot_password_budget_is_per_ip() {
        let limits = AuthRateLimits::new();
        let a: IpAddr = "192.0.2.1".parse().unwrap();
        let b: IpAddr = "192.0.2.2".parse().unwrap();

        for _ in 0..FORGOT_PASSWORD_MAX_ATTEMPTS {
            admit(&limits.forgot_password, a, FORGOT_PASSWORD_LIMIT_MESSAGE).unwrap();
        }
        let err = admit(&limits.forgot_password, a, FORGOT_PASSWORD_LIMIT_MESSAGE).unwrap_err();
        match err {
            AppError::TooManyRequests {
                retry_after_secs, ..
            } => assert!(retry_after_secs >= 1),
            other => panic!("expected TooManyRequests, got {other:?}"),
        }

        admit(&limits.forgot_password, b, FORGOT_PASSWORD_LIMIT_MESSAGE).unwrap();
    }
}
