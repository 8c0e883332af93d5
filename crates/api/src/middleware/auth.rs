//! Cookie-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use portfolio_core::error::CoreError;
use portfolio_core::types::DbId;
use portfolio_db::models::admin::AdminUser;
use portfolio_db::repositories::AdminRepo;

use crate::auth::cookie::token_from_headers;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in admin, re-read from the database on every request.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(admin: AuthAdmin) -> AppResult<Json<()>> {
///     tracing::info!(admin_id = admin.admin_id, role = %admin.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub admin_id: DbId,
    /// Current role from the database (not the token).
    pub role: String,
    pub admin: AdminUser,
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Not authenticated. Please log in.".into(),
            ))
        })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Session expired or invalid. Please log in again.".into(),
            ))
        })?;

        let admin = AdminRepo::find_by_id(&state.pool, claims.id)
            .await?
            .filter(|a| a.is_active)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Account not found or deactivated.".into(),
                ))
            })?;

        Ok(AuthAdmin {
            admin_id: admin.id,
            role: admin.role.clone(),
            admin,
        })
    }
}
