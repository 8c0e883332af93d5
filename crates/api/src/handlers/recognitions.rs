//! Handlers for `/api/recognitions`. Writes require a manager role.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::is_blank;
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::recognition::{Recognition, RecognitionInput};
use portfolio_db::repositories::RecognitionRepo;

use super::{reject_blank, upload_file};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireManager;
use crate::query::ListParams;
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;

/// GET /api/recognitions
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Recognition>>>> {
    let page = params.page_request(10);
    let (rows, total) =
        RecognitionRepo::list(&state.pool, params.pattern().as_deref(), &page).await?;
    Ok(ApiResponse::page(
        "Recognitions fetched.",
        rows,
        page.paginate(total),
    ))
}

/// POST /api/recognitions
pub async fn create(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    AppJson(input): AppJson<RecognitionInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Recognition>>)> {
    if is_blank(input.description.as_deref()) {
        return Err(AppError::validation("Description is required."));
    }
    let recognition = RecognitionRepo::create(&state.pool, &input).await?;
    tracing::info!(id = recognition.id, admin_id = admin.admin_id, "Recognition created");
    Ok(ApiResponse::created("Recognition created.", recognition))
}

/// PUT /api/recognitions/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<RecognitionInput>,
) -> AppResult<Json<ApiResponse<Recognition>>> {
    reject_blank(input.description.as_deref(), "Description cannot be empty.")?;
    let existing = RecognitionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Recognition", id))?;
    let updated = RecognitionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Recognition", id))?;
    state
        .uploads
        .reap_if_replaced(existing.icon_url.as_deref(), updated.icon_url.as_deref())
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Recognition updated");
    Ok(ApiResponse::ok("Recognition updated.", updated))
}

/// DELETE /api/recognitions/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = RecognitionRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Recognition", id))?;
    state.uploads.reap_all(removed.icon_url).await;
    tracing::info!(id, admin_id = admin.admin_id, "Recognition deleted");
    Ok(ApiResponse::message("Recognition deleted."))
}

/// PUT /api/recognitions/{id}/promote
pub async fn promote(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !RecognitionRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Recognition", id));
    }
    tracing::info!(id, admin_id = admin.admin_id, "Recognition promoted");
    Ok(ApiResponse::message("Recognition moved to top."))
}

/// POST /api/recognitions/upload-icon
pub async fn upload_icon(
    State(state): State<AppState>,
    _admin: RequireManager,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    upload_file(&state, multipart, UploadKind::Icon, "Icon uploaded.").await
}
