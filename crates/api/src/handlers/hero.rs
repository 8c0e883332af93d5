//! Handlers for `/api/hero`, the single landing-page banner.

use axum::extract::{Multipart, State};
use axum::Json;
use portfolio_core::error::CoreError;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::hero::{HeroSection, UpdateHeroSection};
use portfolio_db::repositories::HeroRepo;

use super::upload_file;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthAdmin;
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;

/// GET /api/hero
pub async fn get(State(state): State<AppState>) -> AppResult<Json<ApiResponse<HeroSection>>> {
    let hero = HeroRepo::get(&state.pool)
        .await?
        .ok_or_else(|| CoreError::Missing("Hero section not found.".into()))?;
    Ok(ApiResponse::ok("Hero section fetched.", hero))
}

/// PUT /api/hero
pub async fn update(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<UpdateHeroSection>,
) -> AppResult<Json<ApiResponse<HeroSection>>> {
    let previous = HeroRepo::get(&state.pool).await?;
    let hero = HeroRepo::update(&state.pool, &input).await?;
    if let Some(previous) = previous {
        state
            .uploads
            .reap_if_replaced(previous.image_url.as_deref(), hero.image_url.as_deref())
            .await;
    }
    tracing::info!(admin_id = admin.admin_id, "Hero section updated");
    Ok(ApiResponse::ok("Hero section updated.", hero))
}

/// POST /api/hero/upload
pub async fn upload(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    upload_file(&state, multipart, UploadKind::Image, "Image uploaded.").await
}
