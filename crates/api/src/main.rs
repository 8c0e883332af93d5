use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_api::config::ServerConfig;
use portfolio_api::middleware::rate_limit::AuthRateLimits;
use portfolio_api::router::build_app_router;
use portfolio_api::state::AppState;
use portfolio_api::uploads::UploadStore;
use portfolio_db::DbPool;
use portfolio_notify::{EmailConfig, Mailer, Messengers};

const RATE_LIMIT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        secure_cookies = config.secure_cookies,
        "Portfolio API configured"
    );

    let pool = connect_database().await;

    let uploads = UploadStore::new(&config.upload_dir, config.public_base_url.clone());
    uploads
        .ensure_dirs()
        .await
        .expect("upload directory must be creatable");
    tracing::info!(dir = %config.upload_dir.display(), "Serving uploads");

    let mailer = mailer_from_env().map(Arc::new);
    let messengers = Arc::new(Messengers::from_env());

    let rate_limits = Arc::new(AuthRateLimits::new());
    spawn_rate_limit_sweeper(Arc::clone(&rate_limits));

    let config = Arc::new(config);
    let state = AppState {
        pool: pool.clone(),
        config: Arc::clone(&config),
        uploads: Arc::new(uploads),
        mailer,
        messengers,
        rate_limits: Arc::clone(&rate_limits),
    };

    let app = build_app_router(state);

    let ip = config.host.parse().expect("HOST must be an IP address");
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("listen address must be free");
    tracing::info!(%addr, "Listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");

    tracing::info!("No longer accepting requests; closing database pool");
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, pool.close()).await.is_err() {
        tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Database pool did not close in time"
        );
    }
    tracing::info!("Shutdown complete");
}

/// Connect, verify, and migrate. Any failure aborts startup.
async fn connect_database() -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = portfolio_db::create_pool(&database_url)
        .await
        .expect("database must be reachable");
    portfolio_db::health_check(&pool)
        .await
        .expect("database must answer SELECT 1");
    portfolio_db::run_migrations(&pool)
        .await
        .expect("migrations must apply cleanly");
    tracing::info!("Database ready");
    pool
}

/// The SMTP mailer, or `None` when email is not configured or invalid.
fn mailer_from_env() -> Option<Mailer> {
    let Some(email_config) = EmailConfig::from_env() else {
        tracing::warn!("SMTP_HOST not set; emails will be skipped");
        return None;
    };
    Mailer::new(email_config)
        .inspect_err(|e| tracing::warn!(error = %e, "SMTP transport rejected; emails will be skipped"))
        .ok()
}

/// Forget fully refilled rate-limit buckets once a minute.
fn spawn_rate_limit_sweeper(limits: Arc<AuthRateLimits>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            limits.retain_recent();
        }
    });
}

/// Resolves on the first SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Ctrl-C handler must install");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler must install")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!(signal = "SIGINT", "Shutting down");
        }
        () = terminate => {
            tracing::info!(signal = "SIGTERM", "Shutting down");
        }
    }
}
