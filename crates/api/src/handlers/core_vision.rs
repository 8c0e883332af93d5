//! Handlers for `/api/core-vision/pillars`.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::is_blank;
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::core_vision::{Pillar, PillarInput};
use portfolio_db::repositories::PillarRepo;

use super::{reject_blank, upload_file};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::ListParams;
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;

/// GET /api/core-vision/pillars
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Pillar>>>> {
    let page = params.page_request(10);
    let (rows, total) = PillarRepo::list(&state.pool, params.pattern().as_deref(), &page).await?;
    Ok(ApiResponse::page("Pillars fetched.", rows, page.paginate(total)))
}

/// POST /api/core-vision/pillars
pub async fn create(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<PillarInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Pillar>>)> {
    if is_blank(input.title.as_deref()) {
        return Err(AppError::validation("Title is required."));
    }
    let pillar = PillarRepo::create(&state.pool, &input).await?;
    tracing::info!(id = pillar.id, admin_id = admin.admin_id, "Pillar created");
    Ok(ApiResponse::created("Pillar created.", pillar))
}

/// PUT /api/core-vision/pillars/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<PillarInput>,
) -> AppResult<Json<ApiResponse<Pillar>>> {
    reject_blank(input.title.as_deref(), "Title cannot be empty.")?;
    let existing = PillarRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Pillar", id))?;
    let updated = PillarRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Pillar", id))?;
    state
        .uploads
        .reap_if_replaced(existing.image_url.as_deref(), updated.image_url.as_deref())
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Pillar updated");
    Ok(ApiResponse::ok("Pillar updated.", updated))
}

/// DELETE /api/core-vision/pillars/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = PillarRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Pillar", id))?;
    state.uploads.reap_all(removed.image_url).await;
    tracing::info!(id, admin_id = admin.admin_id, "Pillar deleted");
    Ok(ApiResponse::message("Pillar deleted."))
}

/// PUT /api/core-vision/pillars/{id}/promote
pub async fn promote(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !PillarRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Pillar", id));
    }
    Ok(ApiResponse::message("Pillar moved to top."))
}

/// POST /api/core-vision/pillars/upload
pub async fn upload(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    upload_file(&state, multipart, UploadKind::Image, "Image uploaded.").await
}
