use std::sync::Arc;

use portfolio_notify::{Mailer, Messengers};

use crate::config::ServerConfig;
use crate::middleware::rate_limit::AuthRateLimits;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is a pool handle or behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: portfolio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Upload directory (store and reap files).
    pub uploads: Arc<UploadStore>,
    /// SMTP mailer; `None` when email is not configured.
    pub mailer: Option<Arc<Mailer>>,
    /// SMS, WhatsApp, and voice providers.
    pub messengers: Arc<Messengers>,
    /// Per-IP budgets for login and forgot-password.
    pub rate_limits: Arc<AuthRateLimits>,
}
