//! Handlers for `/api/manifesto`: development goals and long-term
//! commitments. Both are ranked lists with the same shape; commitments
//! also carry an icon.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::is_blank;
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::manifesto::{
    DevelopmentGoal, DevelopmentGoalInput, LongTermCommitment, LongTermCommitmentInput,
};
use portfolio_db::repositories::{DevelopmentGoalRepo, LongTermCommitmentRepo};

use super::{reject_blank, upload_file};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::ListParams;
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Development goals
// ---------------------------------------------------------------------------

/// GET /api/manifesto/development-goals
pub async fn list_goals(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<DevelopmentGoal>>>> {
    let page = params.page_request(10);
    let (rows, total) =
        DevelopmentGoalRepo::list(&state.pool, params.pattern().as_deref(), &page).await?;
    Ok(ApiResponse::page(
        "Development goals fetched.",
        rows,
        page.paginate(total),
    ))
}

/// POST /api/manifesto/development-goals
pub async fn create_goal(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<DevelopmentGoalInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<DevelopmentGoal>>)> {
    if is_blank(input.title.as_deref()) {
        return Err(AppError::validation("Title is required."));
    }
    let goal = DevelopmentGoalRepo::create(&state.pool, &input).await?;
    tracing::info!(id = goal.id, admin_id = admin.admin_id, "Development goal created");
    Ok(ApiResponse::created("Development goal created.", goal))
}

/// PUT /api/manifesto/development-goals/{id}
pub async fn update_goal(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<DevelopmentGoalInput>,
) -> AppResult<Json<ApiResponse<DevelopmentGoal>>> {
    reject_blank(input.title.as_deref(), "Title cannot be empty.")?;
    let goal = DevelopmentGoalRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Development goal", id))?;
    tracing::info!(id, admin_id = admin.admin_id, "Development goal updated");
    Ok(ApiResponse::ok("Development goal updated.", goal))
}

/// DELETE /api/manifesto/development-goals/{id}
pub async fn delete_goal(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !DevelopmentGoalRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Development goal", id));
    }
    tracing::info!(id, admin_id = admin.admin_id, "Development goal deleted");
    Ok(ApiResponse::message("Development goal deleted."))
}

/// PUT /api/manifesto/development-goals/{id}/promote
pub async fn promote_goal(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !DevelopmentGoalRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Development goal", id));
    }
    Ok(ApiResponse::message("Development goal moved to top."))
}

// ---------------------------------------------------------------------------
// Long-term commitments
// ---------------------------------------------------------------------------

/// GET /api/manifesto/long-term-commitments
pub async fn list_commitments(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<LongTermCommitment>>>> {
    let page = params.page_request(10);
    let (rows, total) =
        LongTermCommitmentRepo::list(&state.pool, params.pattern().as_deref(), &page).await?;
    Ok(ApiResponse::page(
        "Long-term commitments fetched.",
        rows,
        page.paginate(total),
    ))
}

/// POST /api/manifesto/long-term-commitments
pub async fn create_commitment(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<LongTermCommitmentInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<LongTermCommitment>>)> {
    if is_blank(input.title.as_deref()) {
        return Err(AppError::validation("Title is required."));
    }
    let commitment = LongTermCommitmentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        id = commitment.id,
        admin_id = admin.admin_id,
        "Long-term commitment created"
    );
    Ok(ApiResponse::created("Long-term commitment created.", commitment))
}

/// PUT /api/manifesto/long-term-commitments/{id}
pub async fn update_commitment(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<LongTermCommitmentInput>,
) -> AppResult<Json<ApiResponse<LongTermCommitment>>> {
    reject_blank(input.title.as_deref(), "Title cannot be empty.")?;
    let existing = LongTermCommitmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Long-term commitment", id))?;
    let updated = LongTermCommitmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Long-term commitment", id))?;
    state
        .uploads
        .reap_if_replaced(existing.icon_url.as_deref(), updated.icon_url.as_deref())
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Long-term commitment updated");
    Ok(ApiResponse::ok("Long-term commitment updated.", updated))
}

/// DELETE /api/manifesto/long-term-commitments/{id}
pub async fn delete_commitment(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = LongTermCommitmentRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Long-term commitment", id))?;
    state.uploads.reap_all(removed.icon_url).await;
    tracing::info!(id, admin_id = admin.admin_id, "Long-term commitment deleted");
    Ok(ApiResponse::message("Long-term commitment deleted."))
}

/// PUT /api/manifesto/long-term-commitments/{id}/promote
pub async fn promote_commitment(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !LongTermCommitmentRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Long-term commitment", id));
    }
    Ok(ApiResponse::message("Long-term commitment moved to top."))
}

/// POST /api/manifesto/long-term-commitments/upload
pub async fn upload_commitment_icon(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    upload_file(&state, multipart, UploadKind::Image, "Image uploaded.").await
}
