//! Handlers for `/api/auth` (login, password reset, registration, profile).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_core::content::{require_text, trim_optional, validate_password_length};
use portfolio_core::error::CoreError;
use portfolio_core::roles::{is_valid_role, ROLE_ADMIN, VALID_ROLES};
use portfolio_db::models::admin::{AdminUser, CreateAdminUser, UpdateProfile};
use portfolio_db::repositories::{AdminRepo, PasswordResetRepo};
use portfolio_notify::templates;
use serde::Deserialize;

use crate::auth::cookie::{clear_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::reset::{generate_reset_token, hash_reset_token, reset_expiry};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthAdmin;
use crate::middleware::rate_limit::{ForgotPasswordThrottle, LoginThrottle};
use crate::middleware::rbac::RequireManager;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::tasks::spawn_logged;

/// Answer to every forgot-password request, whether or not the email exists.
pub const FORGOT_PASSWORD_MESSAGE: &str = "If that email exists, a reset link has been sent.";

const INVALID_CREDENTIALS: &str = "Invalid email or password.";
const INVALID_RESET_TOKEN: &str = "Invalid or expired reset token.";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Sets the session cookie. The token is never returned in the body.
/// Limited to 10 attempts per client IP per 15 minutes.
pub async fn login(
    State(state): State<AppState>,
    _throttle: LoginThrottle,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (
        trim_optional(input.email.as_deref()),
        input.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation("Email and password are required."));
    };

    let admin = AdminRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let valid = verify_password(&password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::info!(admin_id = admin.id, "Login failed: bad password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    if !admin.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated. Contact a superadmin.".into(),
        )));
    }

    AdminRepo::record_login(&state.pool, admin.id).await?;

    let token = generate_token(admin.id, &admin.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let cookie = session_cookie(
        &token,
        state.config.jwt.expiry_secs(),
        state.config.secure_cookies,
    );

    let admin = AdminRepo::find_by_id(&state.pool, admin.id)
        .await?
        .ok_or_else(|| AppError::not_found("Admin", admin.id))?;

    tracing::info!(admin_id = admin.id, role = %admin.role, "Admin logged in");
    Ok((
        [(SET_COOKIE, cookie)],
        ApiResponse::ok("Login successful.", admin),
    ))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    admin: AuthAdmin,
) -> impl IntoResponse {
    tracing::info!(admin_id = admin.admin_id, "Admin logged out");
    (
        [(SET_COOKIE, clear_cookie(state.config.secure_cookies))],
        ApiResponse::message("Logged out successfully."),
    )
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

/// POST /api/auth/forgot-password
///
/// Always answers with [`FORGOT_PASSWORD_MESSAGE`]. Failures are logged.
/// Limited to 5 requests per client IP per hour.
pub async fn forgot_password(
    State(state): State<AppState>,
    _throttle: ForgotPasswordThrottle,
    AppJson(input): AppJson<ForgotPasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let Some(email) = trim_optional(input.email.as_deref()) else {
        return Err(AppError::validation("Email is required."));
    };

    if let Err(e) = issue_reset_link(&state, &email).await {
        tracing::error!(error = %e, "Failed to issue password reset");
    }
    Ok(ApiResponse::message(FORGOT_PASSWORD_MESSAGE))
}

async fn issue_reset_link(state: &AppState, email: &str) -> Result<(), sqlx::Error> {
    let Some(admin) = AdminRepo::find_by_email(&state.pool, email).await? else {
        return Ok(());
    };
    if !admin.is_active {
        return Ok(());
    }

    let (token, token_hash) = generate_reset_token();
    PasswordResetRepo::replace_for_admin(&state.pool, admin.id, &token_hash, reset_expiry())
        .await?;
    tracing::info!(admin_id = admin.id, "Password reset token issued");

    match state.mailer.clone() {
        Some(mailer) => {
            let message = templates::password_reset(
                mailer.app_name(),
                &state.config.frontend_url,
                &admin.full_name,
                &token,
            );
            spawn_logged("password_reset_email", async move {
                mailer.send(&admin.email, &message).await
            });
        }
        None => tracing::warn!(admin_id = admin.id, "Email disabled; reset link not sent"),
    }
    Ok(())
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(input): AppJson<ResetPasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let token = require_text(input.token.as_deref(), "Token and new password are required.")?;
    let new_password = input
        .new_password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("Token and new password are required."))?;
    validate_password_length(&new_password)?;

    let reset = PasswordResetRepo::find_valid(&state.pool, &hash_reset_token(&token))
        .await?
        .ok_or_else(|| AppError::validation(INVALID_RESET_TOKEN))?;

    let hashed = hash_password(&new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    if !PasswordResetRepo::consume(&state.pool, reset.id, reset.admin_id, &hashed).await? {
        return Err(AppError::validation(INVALID_RESET_TOKEN));
    }

    tracing::info!(admin_id = reset.admin_id, "Password reset completed");
    Ok(ApiResponse::message(
        "Password has been reset successfully. Please log in.",
    ))
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Only superadmins and admins may create accounts; editors get 403.
pub async fn register(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AdminUser>>)> {
    let full_name = require_text(input.full_name.as_deref(), "full_name is required.")?;
    let email = require_text(input.email.as_deref(), "email is required.")?.to_lowercase();
    if !email.contains('@') {
        return Err(AppError::validation("email must be a valid email address."));
    }
    let password = input
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("password is required."))?;
    validate_password_length(&password)?;

    let role = trim_optional(input.role.as_deref()).unwrap_or_else(|| ROLE_ADMIN.to_string());
    if !is_valid_role(&role) {
        return Err(AppError::validation(format!(
            "role must be one of: {}.",
            VALID_ROLES.join(", ")
        )));
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let created = AdminRepo::create(
        &state.pool,
        &CreateAdminUser {
            full_name,
            email,
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(
        admin_id = created.id,
        created_by = admin.admin_id,
        role = %created.role,
        "Admin registered"
    );

    if let Some(mailer) = state.mailer.clone() {
        let message = templates::welcome(
            mailer.app_name(),
            &state.config.frontend_url,
            &created.full_name,
            &created.email,
        );
        let to = created.email.clone();
        spawn_logged("welcome_email", async move { mailer.send(&to, &message).await });
    }

    Ok(ApiResponse::created("Admin registered successfully.", created))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let (Some(current), Some(new_password)) = (
        input.current_password.filter(|p| !p.is_empty()),
        input.new_password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation(
            "current_password and new_password are required.",
        ));
    };

    let valid = verify_password(&current, &admin.admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect.".into(),
        )));
    }
    validate_password_length(&new_password)?;

    let hashed = hash_password(&new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    AdminRepo::update_password(&state.pool, admin.admin_id, &hashed).await?;

    tracing::info!(admin_id = admin.admin_id, "Password changed");
    Ok(ApiResponse::message("Password changed successfully."))
}

/// GET /api/auth/profile
pub async fn get_profile(admin: AuthAdmin) -> Json<ApiResponse<AdminUser>> {
    ApiResponse::ok("Profile fetched.", admin.admin)
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<UpdateProfile>,
) -> AppResult<Json<ApiResponse<AdminUser>>> {
    let updated = AdminRepo::update_profile(&state.pool, admin.admin_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Admin", admin.admin_id))?;

    state
        .uploads
        .reap_if_replaced(
            admin.admin.profile_image.as_deref(),
            updated.profile_image.as_deref(),
        )
        .await;

    tracing::info!(admin_id = admin.admin_id, "Profile updated");
    Ok(ApiResponse::ok("Profile updated.", updated))
}
