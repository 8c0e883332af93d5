//! Handlers for `/api/achievements`.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::is_blank;
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::achievement::{Achievement, AchievementInput};
use portfolio_db::repositories::AchievementRepo;

use super::{reject_blank, upload_file};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::ListParams;
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 10;

/// GET /api/achievements
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Achievement>>>> {
    let page = params.page_request(DEFAULT_LIMIT);
    let (rows, total) =
        AchievementRepo::list(&state.pool, params.pattern().as_deref(), &page).await?;
    Ok(ApiResponse::page(
        "Achievements fetched.",
        rows,
        page.paginate(total),
    ))
}

/// POST /api/achievements
pub async fn create(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<AchievementInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Achievement>>)> {
    if is_blank(input.title.as_deref()) {
        return Err(AppError::validation("Title is required."));
    }
    let achievement = AchievementRepo::create(&state.pool, &input).await?;
    tracing::info!(id = achievement.id, admin_id = admin.admin_id, "Achievement created");
    Ok(ApiResponse::created("Achievement created.", achievement))
}

/// PUT /api/achievements/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<AchievementInput>,
) -> AppResult<Json<ApiResponse<Achievement>>> {
    reject_blank(input.title.as_deref(), "Title cannot be empty.")?;
    let existing = AchievementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Achievement", id))?;

    let updated = AchievementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Achievement", id))?;
    state
        .uploads
        .reap_if_replaced(existing.icon_url.as_deref(), updated.icon_url.as_deref())
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Achievement updated");
    Ok(ApiResponse::ok("Achievement updated.", updated))
}

/// DELETE /api/achievements/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = AchievementRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Achievement", id))?;
    state.uploads.reap_all(removed.icon_url).await;

    tracing::info!(id, admin_id = admin.admin_id, "Achievement deleted");
    Ok(ApiResponse::message("Achievement deleted."))
}

/// PUT /api/achievements/{id}/promote
pub async fn promote(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !AchievementRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Achievement", id));
    }
    tracing::info!(id, admin_id = admin.admin_id, "Achievement promoted");
    Ok(ApiResponse::message("Achievement moved to top."))
}

/// POST /api/achievements/upload-icon
pub async fn upload_icon(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    upload_file(&state, multipart, UploadKind::Icon, "Icon uploaded.").await
}
