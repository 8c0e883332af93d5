//! Handlers for `/api/ente-nadu` cards.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::is_blank;
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::ente_nadu::{EnteNaduCard, EnteNaduCardInput};
use portfolio_db::repositories::EnteNaduCardRepo;

use super::{reject_blank, upload_file};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::ListParams;
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;

/// GET /api/ente-nadu
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<EnteNaduCard>>>> {
    let page = params.page_request(10);
    let (rows, total) =
        EnteNaduCardRepo::list(&state.pool, params.pattern().as_deref(), &page).await?;
    Ok(ApiResponse::page("Cards fetched.", rows, page.paginate(total)))
}

/// POST /api/ente-nadu
///
/// `icon_name` falls back to the default icon when omitted.
pub async fn create(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<EnteNaduCardInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<EnteNaduCard>>)> {
    if is_blank(input.title.as_deref()) {
        return Err(AppError::validation("Title is required."));
    }
    let card = EnteNaduCardRepo::create(&state.pool, &input).await?;
    tracing::info!(id = card.id, admin_id = admin.admin_id, "Ente Nadu card created");
    Ok(ApiResponse::created("Card created.", card))
}

/// PUT /api/ente-nadu/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<EnteNaduCardInput>,
) -> AppResult<Json<ApiResponse<EnteNaduCard>>> {
    reject_blank(input.title.as_deref(), "Title cannot be empty.")?;
    let existing = EnteNaduCardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Card", id))?;
    let updated = EnteNaduCardRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Card", id))?;
    state
        .uploads
        .reap_if_replaced(existing.icon_url.as_deref(), updated.icon_url.as_deref())
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Ente Nadu card updated");
    Ok(ApiResponse::ok("Card updated.", updated))
}

/// DELETE /api/ente-nadu/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = EnteNaduCardRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Card", id))?;
    state.uploads.reap_all(removed.icon_url).await;
    tracing::info!(id, admin_id = admin.admin_id, "Ente Nadu card deleted");
    Ok(ApiResponse::message("Card deleted."))
}

/// PUT /api/ente-nadu/{id}/promote
pub async fn promote(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !EnteNaduCardRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Card", id));
    }
    Ok(ApiResponse::message("Card moved to top."))
}

/// POST /api/ente-nadu/upload-icon
pub async fn upload_icon(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    upload_file(&state, multipart, UploadKind::Icon, "Icon uploaded.").await
}
