//! HTTP-level tests for `/api/auth`: login, session cookie, role guards,
//! and the password reset flow.

mod common;

use axum::http::StatusCode;
use common::{
    admin_cookie, body_json, get, get_auth, login, post_json, post_json_auth, seed_admin,
    session_cookie, TEST_PASSWORD,
};
use portfolio_api::auth::reset::hash_reset_token;
use portfolio_api::handlers::auth::FORGOT_PASSWORD_MESSAGE;
use portfolio_db::repositories::PasswordResetRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_sets_http_only_cookie_and_hides_hash(pool: PgPool) {
    seed_admin(&pool, "owner@test.com", "superadmin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "owner@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let raw_cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(raw_cookie.contains("HttpOnly"));
    assert!(session_cookie(&response).is_some());

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "owner@test.com");
    assert!(json["data"].get("password_hash").is_none());
    assert!(json["data"]["last_login"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_wrong_password_is_401(pool: PgPool) {
    seed_admin(&pool, "owner@test.com", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "owner@test.com", "password": "nope" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_missing_fields_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/auth/login", serde_json::json!({ "email": "x@test.com" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivated_account_is_403(pool: PgPool) {
    let admin = seed_admin(&pool, "gone@test.com", "admin").await;
    sqlx::query("UPDATE admin_users SET is_active = FALSE WHERE id = $1")
        .bind(admin.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "gone@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn eleventh_login_attempt_is_rate_limited(pool: PgPool) {
    seed_admin(&pool, "owner@test.com", "admin").await;
    let app = common::build_test_app(pool);
    let wrong = serde_json::json!({ "email": "owner@test.com", "password": "nope" });

    for _ in 0..10 {
        let response = post_json(app.clone(), "/api/auth/login", wrong.clone()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let right = serde_json::json!({ "email": "owner@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", right).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));
    assert!(session_cookie(&response).is_none());
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(
        json["message"],
        "Too many attempts. Please try again after 15 minutes."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sixth_forgot_password_request_is_rate_limited(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "someone@test.com" });

    for _ in 0..5 {
        let response = post_json(app.clone(), "/api/auth/forgot-password", body.clone()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = post_json(app.clone(), "/api/auth/forgot-password", body).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);

    // Separate budgets: login is still open.
    let login_body = serde_json::json!({ "email": "someone@test.com", "password": "x" });
    let response = post_json(app, "/api/auth/login", login_body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Session guard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn profile_requires_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/auth/profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn profile_returns_logged_in_admin(pool: PgPool) {
    let cookie = admin_cookie(&pool, "editor").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/profile", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "editor");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tampered_cookie_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/auth/profile", "admin_token=not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivation_revokes_existing_session(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    sqlx::query("UPDATE admin_users SET is_active = FALSE WHERE email = 'admin@test.com'")
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/profile", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editor_cannot_write_recognitions(pool: PgPool) {
    let cookie = admin_cookie(&pool, "editor").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "description": "Best MLA award" });
    let response = post_json_auth(app, "/api/recognitions", body, &cookie).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_can_write_recognitions(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "description": "Best MLA award" });
    let response = post_json_auth(app, "/api/recognitions", body, &cookie).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["description"], "Best MLA award");
    assert_eq!(json["data"]["icon_name"], "Activity");
}

// ---------------------------------------------------------------------------
// Registration and passwords
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_duplicate_email(pool: PgPool) {
    let cookie = admin_cookie(&pool, "superadmin").await;
    let body = serde_json::json!({
        "full_name": "Second",
        "email": "superadmin@test.com",
        "password": "another_password",
    });
    let response =
        post_json_auth(common::build_test_app(pool), "/api/auth/register", body, &cookie).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editor_cannot_register_accounts(pool: PgPool) {
    let cookie = admin_cookie(&pool, "editor").await;
    let body = serde_json::json!({
        "full_name": "Escalated",
        "email": "escalated@test.com",
        "password": "escalated_password",
        "role": "superadmin",
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/auth/register",
        body,
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let created: Option<i64> =
        sqlx::query_scalar("SELECT id FROM admin_users WHERE email = 'escalated@test.com'")
            .fetch_optional(&pool)
            .await
            .unwrap();
    assert!(created.is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_unknown_role(pool: PgPool) {
    let cookie = admin_cookie(&pool, "superadmin").await;
    let body = serde_json::json!({
        "full_name": "Viewer",
        "email": "viewer@test.com",
        "password": "viewer_password",
        "role": "viewer",
    });
    let response =
        post_json_auth(common::build_test_app(pool), "/api/auth/register", body, &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_requires_current_password(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    let body = serde_json::json!({
        "current_password": "wrong",
        "new_password": "new_password_1",
    });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/auth/change-password",
        body,
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn forgot_password_answers_the_same_for_unknown_email(pool: PgPool) {
    seed_admin(&pool, "known@test.com", "admin").await;

    for email in ["known@test.com", "unknown@test.com"] {
        let response = post_json(
            common::build_test_app(pool.clone()),
            "/api/auth/forgot-password",
            serde_json::json!({ "email": email }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], FORGOT_PASSWORD_MESSAGE);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reset_token_works_exactly_once(pool: PgPool) {
    let admin = seed_admin(&pool, "reset@test.com", "admin").await;
    let token = "known-reset-token";
    let expires = chrono::Utc::now() + chrono::Duration::minutes(30);
    PasswordResetRepo::replace_for_admin(&pool, admin.id, &hash_reset_token(token), expires)
        .await
        .unwrap();

    let body = serde_json::json!({ "token": token, "new_password": "fresh_password" });
    let first = post_json(
        common::build_test_app(pool.clone()),
        "/api/auth/reset-password",
        body.clone(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(
        common::build_test_app(pool.clone()),
        "/api/auth/reset-password",
        body,
    )
    .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let login_body = serde_json::json!({ "email": "reset@test.com", "password": "fresh_password" });
    let response = post_json(common::build_test_app(pool.clone()), "/api/auth/login", login_body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The old password no longer works.
    let old = serde_json::json!({ "email": "reset@test.com", "password": TEST_PASSWORD });
    let response = post_json(common::build_test_app(pool), "/api/auth/login", old).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_clears_cookie(pool: PgPool) {
    seed_admin(&pool, "out@test.com", "admin").await;
    let cookie = login(common::build_test_app(pool.clone()), "out@test.com").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/auth/logout",
        serde_json::json!({}),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = session_cookie(&response).unwrap();
    assert_eq!(cleared, "admin_token=");
}
