//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthAdmin`] and rejects requests whose role does
//! not meet the requirement.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use portfolio_core::error::CoreError;
use portfolio_core::roles::is_manager_role;

use super::auth::AuthAdmin;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `superadmin` or `admin` role. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn manager_only(RequireManager(admin): RequireManager) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireManager(pub AuthAdmin);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin = AuthAdmin::from_request_parts(parts, state).await?;
        if !is_manager_role(&admin.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "You do not have permission to perform this action.".into(),
            )));
        }
        Ok(RequireManager(admin))
    }
}
