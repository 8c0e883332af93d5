use std::path::PathBuf;

use chrono::FixedOffset;
use portfolio_core::event_status::utc_offset;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Directory served at `/uploads` (default: `uploads`).
    pub upload_dir: PathBuf,
    /// Origin prefixed to upload paths when an absolute URL is needed.
    pub public_base_url: String,
    /// Frontend origin used in email links.
    pub frontend_url: String,
    /// Inbox that receives new-enquiry alerts. `None` skips the alert.
    pub admin_alert_email: Option<String>,
    /// Offset used to interpret event dates and times.
    pub event_utc_offset: FixedOffset,
    /// Mark the auth cookie `Secure` (set when `APP_ENV=production`).
    pub secure_cookies: bool,
    /// Key auth rate limits on `X-Forwarded-For` / `X-Real-IP` instead of
    /// the peer address. Only enable behind a proxy that sets them.
    pub trust_proxy: bool,
    /// JWT signing configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `HOST`                     | `0.0.0.0`                |
    /// | `PORT`                     | `5000`                   |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                     |
    /// | `UPLOAD_DIR`               | `uploads`                |
    /// | `PUBLIC_BASE_URL`          | `http://localhost:5000`  |
    /// | `FRONTEND_URL`             | `http://localhost:3000`  |
    /// | `ADMIN_ALERT_EMAIL`        | unset                    |
    /// | `EVENT_UTC_OFFSET_MINUTES` | `0`                      |
    /// | `APP_ENV`                  | `development`            |
    /// | `TRUST_PROXY`              | `false`                  |
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric values or a missing `JWT_SECRET`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        );

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000".into())
            .trim_end_matches('/')
            .to_string();

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let admin_alert_email = std::env::var("ADMIN_ALERT_EMAIL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let offset_minutes: i32 = std::env::var("EVENT_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("EVENT_UTC_OFFSET_MINUTES must be a valid i32");
        let event_utc_offset =
            utc_offset(offset_minutes).expect("EVENT_UTC_OFFSET_MINUTES out of range");

        let secure_cookies = std::env::var("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let trust_proxy = std::env::var("TRUST_PROXY")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            upload_dir,
            public_base_url,
            frontend_url,
            admin_alert_email,
            event_utc_offset,
            secure_cookies,
            trust_proxy,
            jwt,
        }
    }
}
