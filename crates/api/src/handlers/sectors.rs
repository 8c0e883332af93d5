//! Handlers for `/api/sectors`.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::is_blank;
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::sector::{Sector, SectorInput};
use portfolio_db::repositories::SectorRepo;

use super::{reject_blank, upload_file};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthAdmin;
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;

/// GET /api/sectors
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Sector>>>> {
    let sectors = SectorRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Sectors fetched.", sectors))
}

/// GET /api/sectors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Sector>>> {
    let sector = SectorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Sector", id))?;
    Ok(ApiResponse::ok("Sector fetched.", sector))
}

/// POST /api/sectors
pub async fn create(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<SectorInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Sector>>)> {
    if is_blank(input.name.as_deref()) {
        return Err(AppError::validation("Sector name is required."));
    }
    let sector = SectorRepo::create(&state.pool, &input).await?;
    tracing::info!(id = sector.id, name = %sector.name, admin_id = admin.admin_id, "Sector created");
    Ok(ApiResponse::created("Sector created.", sector))
}

/// PUT /api/sectors/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<SectorInput>,
) -> AppResult<Json<ApiResponse<Sector>>> {
    reject_blank(input.name.as_deref(), "Sector name cannot be empty.")?;
    let existing = SectorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Sector", id))?;
    let updated = SectorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Sector", id))?;
    state
        .uploads
        .reap_if_replaced(existing.image_url.as_deref(), updated.image_url.as_deref())
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Sector updated");
    Ok(ApiResponse::ok("Sector updated.", updated))
}

/// DELETE /api/sectors/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = SectorRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Sector", id))?;
    state.uploads.reap_all(removed.image_url).await;
    tracing::info!(id, admin_id = admin.admin_id, "Sector deleted");
    Ok(ApiResponse::message("Sector deleted."))
}

/// PUT /api/sectors/{id}/promote
pub async fn promote(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !SectorRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Sector", id));
    }
    Ok(ApiResponse::message("Sector moved to top."))
}

/// POST /api/sectors/upload
pub async fn upload(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    upload_file(&state, multipart, UploadKind::Image, "Image uploaded.").await
}
