//! Handlers for `/api/local-bodies` and their nested wards.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::is_blank;
use portfolio_core::search::PageRequest;
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::local_body::{LocalBody, LocalBodyInput, Ward, WardInput};
use portfolio_db::repositories::{LocalBodyRepo, WardRepo};

use super::{reject_blank, upload_file};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::ListParams;
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;

/// Page size for wards when the caller pages without a limit of its own.
const WARD_PAGE_LIMIT: i64 = 6;

// ---------------------------------------------------------------------------
// Local bodies
// ---------------------------------------------------------------------------

/// GET /api/local-bodies
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<LocalBody>>>> {
    let bodies = LocalBodyRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Local bodies fetched.", bodies))
}

/// GET /api/local-bodies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<LocalBody>>> {
    let body = LocalBodyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Local body", id))?;
    Ok(ApiResponse::ok("Local body fetched.", body))
}

/// POST /api/local-bodies
pub async fn create(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<LocalBodyInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<LocalBody>>)> {
    if is_blank(input.name.as_deref()) {
        return Err(AppError::validation("Name is required."));
    }
    let body = LocalBodyRepo::create(&state.pool, &input).await?;
    tracing::info!(id = body.id, name = %body.name, admin_id = admin.admin_id, "Local body created");
    Ok(ApiResponse::created("Local body created.", body))
}

/// PUT /api/local-bodies/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<LocalBodyInput>,
) -> AppResult<Json<ApiResponse<LocalBody>>> {
    reject_blank(input.name.as_deref(), "Name cannot be empty.")?;
    let existing = LocalBodyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Local body", id))?;
    let updated = LocalBodyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Local body", id))?;
    state
        .uploads
        .reap_if_replaced(existing.cover_image.as_deref(), updated.cover_image.as_deref())
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Local body updated");
    Ok(ApiResponse::ok("Local body updated.", updated))
}

/// DELETE /api/local-bodies/{id}
///
/// Wards go with the local body; events and projects keep their rows with
/// the reference cleared.
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = LocalBodyRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Local body", id))?;
    state.uploads.reap_all(removed.cover_image).await;
    tracing::info!(id, admin_id = admin.admin_id, "Local body deleted");
    Ok(ApiResponse::message("Local body deleted."))
}

/// POST /api/local-bodies/upload
pub async fn upload(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    upload_file(&state, multipart, UploadKind::Image, "Image uploaded.").await
}

// ---------------------------------------------------------------------------
// Wards
// ---------------------------------------------------------------------------

/// GET /api/local-bodies/{local_body_id}/wards?search=&page=&limit=
///
/// The full list unless the caller asks for a page.
pub async fn list_wards(
    State(state): State<AppState>,
    AppPath(local_body_id): AppPath<DbId>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Ward>>>> {
    ensure_local_body(&state, local_body_id).await?;
    let search = params.pattern();

    if params.page.is_some() && params.limit.is_some() {
        let page = PageRequest::new(params.page, params.limit, WARD_PAGE_LIMIT);
        let (wards, total) =
            WardRepo::list_page(&state.pool, local_body_id, search.as_deref(), &page).await?;
        return Ok(ApiResponse::page("Wards fetched.", wards, page.paginate(total)));
    }

    let wards = WardRepo::list_all(&state.pool, local_body_id, search.as_deref()).await?;
    Ok(ApiResponse::ok("Wards fetched.", wards))
}

/// POST /api/local-bodies/{local_body_id}/wards
pub async fn create_ward(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(local_body_id): AppPath<DbId>,
    AppJson(input): AppJson<WardInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Ward>>)> {
    require_ward_fields(&input)?;
    ensure_local_body(&state, local_body_id).await?;

    let ward = WardRepo::create(&state.pool, local_body_id, &input).await?;
    tracing::info!(
        id = ward.id,
        local_body_id,
        ward_no = %ward.ward_no,
        admin_id = admin.admin_id,
        "Ward created"
    );
    Ok(ApiResponse::created("Ward created.", ward))
}

/// PUT /api/local-bodies/{local_body_id}/wards/{id}
pub async fn update_ward(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath((local_body_id, id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<WardInput>,
) -> AppResult<Json<ApiResponse<Ward>>> {
    require_ward_fields(&input)?;
    let ward = WardRepo::update(&state.pool, local_body_id, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Ward", id))?;
    tracing::info!(id, local_body_id, admin_id = admin.admin_id, "Ward updated");
    Ok(ApiResponse::ok("Ward updated.", ward))
}

/// DELETE /api/local-bodies/{local_body_id}/wards/{id}
pub async fn delete_ward(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath((local_body_id, id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !WardRepo::delete(&state.pool, local_body_id, id).await? {
        return Err(AppError::not_found("Ward", id));
    }
    tracing::info!(id, local_body_id, admin_id = admin.admin_id, "Ward deleted");
    Ok(ApiResponse::message("Ward deleted."))
}

fn require_ward_fields(input: &WardInput) -> AppResult<()> {
    if is_blank(input.ward_no.as_deref()) || is_blank(input.place_name.as_deref()) {
        return Err(AppError::validation("Ward number and place name are required."));
    }
    Ok(())
}

async fn ensure_local_body(state: &AppState, id: DbId) -> AppResult<()> {
    if !LocalBodyRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Local body", id));
    }
    Ok(())
}
