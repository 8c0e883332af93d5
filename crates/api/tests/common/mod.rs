#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::FixedOffset;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use portfolio_api::auth::cookie::COOKIE_NAME;
use portfolio_api::auth::jwt::JwtConfig;
use portfolio_api::auth::password::hash_password;
use portfolio_api::config::ServerConfig;
use portfolio_api::middleware::rate_limit::AuthRateLimits;
use portfolio_api::router::build_app_router;
use portfolio_api::state::AppState;
use portfolio_api::uploads::UploadStore;
use portfolio_db::models::admin::{AdminUser, CreateAdminUser};
use portfolio_db::repositories::AdminRepo;
use portfolio_notify::Messengers;

/// Password given to every seeded admin.
pub const TEST_PASSWORD: &str = "test_password_123";

const MULTIPART_BOUNDARY: &str = "----portfolio-test-boundary";

/// Build a test `ServerConfig` with safe defaults and uploads under `upload_dir`.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        public_base_url: "http://localhost:5000".to_string(),
        frontend_url: "http://localhost:3000".to_string(),
        admin_alert_email: None,
        event_utc_offset: FixedOffset::east_opt(0).unwrap(),
        secure_cookies: false,
        trust_proxy: false,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_days: 7,
        },
    }
}

/// Build the full application router, storing uploads in a shared scratch
/// directory. Use [`build_test_app_with_uploads`] when a test inspects files.
pub fn build_test_app(pool: PgPool) -> Router {
    let dir: PathBuf = std::env::temp_dir().join("portfolio-api-tests");
    std::fs::create_dir_all(dir.join("icons")).unwrap();
    build_test_app_with_uploads(pool, &dir)
}

/// Build the full application router with email and messaging disabled.
///
/// Uses [`build_app_router`] so tests exercise the production middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app_with_uploads(pool: PgPool, upload_dir: &Path) -> Router {
    build_test_app_with(pool, upload_dir, Messengers::default())
}

/// Build the router with the given messaging providers.
pub fn build_test_app_with_messengers(pool: PgPool, messengers: Messengers) -> Router {
    let dir: PathBuf = std::env::temp_dir().join("portfolio-api-tests");
    build_test_app_with(pool, &dir, messengers)
}

fn build_test_app_with(pool: PgPool, upload_dir: &Path, messengers: Messengers) -> Router {
    let config = test_config(upload_dir);
    let uploads = UploadStore::new(upload_dir, config.public_base_url.clone());
    let state = AppState {
        pool,
        config: Arc::new(config),
        uploads: Arc::new(uploads),
        mailer: None,
        messengers: Arc::new(messengers),
        rate_limits: Arc::new(AuthRateLimits::new()),
    };
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Insert an admin with [`TEST_PASSWORD`] directly into the database.
pub async fn seed_admin(pool: &PgPool, email: &str, role: &str) -> AdminUser {
    let input = CreateAdminUser {
        full_name: format!("Test {role}"),
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    AdminRepo::create(pool, &input)
        .await
        .expect("admin creation should succeed")
}

/// Log in through the API and return the `Cookie` header value.
pub async fn login(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), 200, "login should succeed");
    session_cookie(&response).expect("login must set the session cookie")
}

/// Seed an admin with `role` and return its session cookie.
pub async fn admin_cookie(pool: &PgPool, role: &str) -> String {
    let email = format!("{role}@test.com");
    seed_admin(pool, &email, role).await;
    login(build_test_app(pool.clone()), &email).await
}

/// `name=value` of the session cookie set by `response`, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{COOKIE_NAME}=")))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    body: &serde_json::Value,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(cookie))).await
}

pub async fn delete_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(cookie))).await
}

pub async fn put_empty_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, empty_request(Method::PUT, uri, Some(cookie))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(cookie))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body, Some(cookie))).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, &body, Some(cookie))).await
}

/// A file part for [`post_multipart_auth`].
pub struct FilePart<'a> {
    pub field: &'a str,
    pub filename: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

/// POST a multipart form with text fields and file parts.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[FilePart<'_>],
    cookie: &str,
) -> Response<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for file in files {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.filename, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header(COOKIE, cookie)
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
