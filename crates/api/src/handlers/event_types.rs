//! Handlers for `/api/event-types`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::is_blank;
use portfolio_core::types::DbId;
use portfolio_db::models::event_type::{EventType, EventTypeInput};
use portfolio_db::repositories::EventTypeRepo;

use super::reject_blank;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/event-types
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<EventType>>>> {
    let types = EventTypeRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Event types fetched.", types))
}

/// POST /api/event-types
pub async fn create(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<EventTypeInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<EventType>>)> {
    if is_blank(input.type_name.as_deref()) {
        return Err(AppError::validation("Type name is required."));
    }
    let event_type = EventTypeRepo::create(&state.pool, &input).await?;
    tracing::info!(id = event_type.id, admin_id = admin.admin_id, "Event type created");
    Ok(ApiResponse::created("Event type created.", event_type))
}

/// PUT /api/event-types/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<EventTypeInput>,
) -> AppResult<Json<ApiResponse<EventType>>> {
    reject_blank(input.type_name.as_deref(), "Type name cannot be empty.")?;
    let event_type = EventTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Event type", id))?;
    tracing::info!(id, admin_id = admin.admin_id, "Event type updated");
    Ok(ApiResponse::ok("Event type updated.", event_type))
}

/// DELETE /api/event-types/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !EventTypeRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Event type", id));
    }
    tracing::info!(id, admin_id = admin.admin_id, "Event type deleted");
    Ok(ApiResponse::message("Event type deleted."))
}
