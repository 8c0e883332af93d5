//! Handlers for `/api/ente-nadu-testimonials`.
//!
//! Text testimonials need an author, video testimonials need a video URL.
//! Ranks are kept per type, so promote only reorders within one type.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::{validate_testimonial, TestimonialType};
use portfolio_core::search::{like_pattern, PageRequest};
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::ente_nadu::{Testimonial, TestimonialInput};
use portfolio_db::repositories::TestimonialRepo;
use serde::Deserialize;

use super::upload_file;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::lenient;
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TestimonialListParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
}

/// GET /api/ente-nadu-testimonials?type=&search=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TestimonialListParams>,
) -> AppResult<Json<ApiResponse<Vec<Testimonial>>>> {
    let kind = match params.kind.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(TestimonialType::from_str(raw)?),
    };
    let page = PageRequest::new(params.page, params.limit, 10);
    let search = like_pattern(params.search.as_deref());

    let (rows, total) = TestimonialRepo::list(
        &state.pool,
        kind.map(|k| k.as_str()),
        search.as_deref(),
        &page,
    )
    .await?;
    Ok(ApiResponse::page(
        "Testimonials fetched.",
        rows,
        page.paginate(total),
    ))
}

/// GET /api/ente-nadu-testimonials/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Testimonial>>> {
    let testimonial = TestimonialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Testimonial", id))?;
    Ok(ApiResponse::ok("Testimonial fetched.", testimonial))
}

/// POST /api/ente-nadu-testimonials
pub async fn create(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<TestimonialInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Testimonial>>)> {
    let kind = TestimonialType::from_str(input.kind.as_deref().unwrap_or("").trim())?;
    validate_testimonial(kind, input.author_name.as_deref(), input.video_url.as_deref())?;

    let testimonial = TestimonialRepo::create(&state.pool, kind.as_str(), &input).await?;
    tracing::info!(
        id = testimonial.id,
        kind = kind.as_str(),
        admin_id = admin.admin_id,
        "Testimonial created"
    );
    Ok(ApiResponse::created("Testimonial created.", testimonial))
}

/// PUT /api/ente-nadu-testimonials/{id}
///
/// Validation runs against the merged row: omitted fields keep their
/// stored value, so switching type only needs the field the new type
/// requires.
pub async fn update(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<TestimonialInput>,
) -> AppResult<Json<ApiResponse<Testimonial>>> {
    let existing = TestimonialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Testimonial", id))?;

    let kind = match input.kind.as_deref() {
        Some(raw) => TestimonialType::from_str(raw.trim())?,
        None => TestimonialType::from_str(&existing.kind)?,
    };
    validate_testimonial(
        kind,
        input.author_name.as_deref().or(existing.author_name.as_deref()),
        input.video_url.as_deref().or(existing.video_url.as_deref()),
    )?;

    let updated = TestimonialRepo::update(&state.pool, id, kind.as_str(), &input)
        .await?
        .ok_or_else(|| AppError::not_found("Testimonial", id))?;

    state
        .uploads
        .reap_if_replaced(existing.avatar_url.as_deref(), updated.avatar_url.as_deref())
        .await;
    state
        .uploads
        .reap_if_replaced(
            existing.thumbnail_url.as_deref(),
            updated.thumbnail_url.as_deref(),
        )
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Testimonial updated");
    Ok(ApiResponse::ok("Testimonial updated.", updated))
}

/// DELETE /api/ente-nadu-testimonials/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = TestimonialRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Testimonial", id))?;
    state
        .uploads
        .reap_all(removed.avatar_url.into_iter().chain(removed.thumbnail_url))
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Testimonial deleted");
    Ok(ApiResponse::message("Testimonial deleted."))
}

/// PUT /api/ente-nadu-testimonials/{id}/promote
pub async fn promote(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !TestimonialRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Testimonial", id));
    }
    tracing::info!(id, admin_id = admin.admin_id, "Testimonial promoted");
    Ok(ApiResponse::message("Testimonial moved to top."))
}

/// POST /api/ente-nadu-testimonials/upload
pub async fn upload(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    upload_file(&state, multipart, UploadKind::Image, "Image uploaded.").await
}
