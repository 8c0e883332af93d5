//! Handlers for `/api/visual-stories`. Writes require a manager role.
//!
//! Create and update arrive as multipart forms carrying an optional
//! `video` file (stored when `video_type=upload`) and an optional
//! `thumbnail` image. Files stored by a request that then fails are
//! reaped before the error is returned.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::VideoSource;
use portfolio_core::types::{DbId, Rank};
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::visual_story::{VisualStory, VisualStoryRecord};
use portfolio_db::repositories::VisualStoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::rbac::RequireManager;
use crate::query::ListParams;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::uploads::{collect_form, UploadForm};

const FILE_FIELDS: &[(&str, UploadKind)] = &[
    ("video", UploadKind::Media),
    ("thumbnail", UploadKind::Thumbnail),
];

/// GET /api/visual-stories
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<VisualStory>>>> {
    let page = params.page_request(10);
    let (rows, total) =
        VisualStoryRepo::list(&state.pool, params.pattern().as_deref(), &page).await?;
    Ok(ApiResponse::page(
        "Visual stories fetched.",
        rows,
        page.paginate(total),
    ))
}

/// GET /api/visual-stories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<VisualStory>>> {
    let story = VisualStoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Visual story", id))?;
    Ok(ApiResponse::ok("Visual story fetched.", story))
}

/// POST /api/visual-stories (multipart)
pub async fn create(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<VisualStory>>)> {
    let form = collect_form(&state.uploads, &mut multipart, FILE_FIELDS).await?;

    let result = insert_from_form(&state, &form).await;
    if result.is_err() {
        state.uploads.reap_all(form.file_urls()).await;
    }
    let story = result?;

    // A video file sent alongside a url-type story is not referenced.
    if story.video_type == VideoSource::Url.as_str() {
        state.uploads.reap_all(form.file("video")).await;
    }

    tracing::info!(
        id = story.id,
        video_type = %story.video_type,
        admin_id = admin.admin_id,
        "Visual story created"
    );
    Ok(ApiResponse::created("Visual story created.", story))
}

async fn insert_from_form(state: &AppState, form: &UploadForm) -> AppResult<VisualStory> {
    let title = form
        .text("title")
        .ok_or_else(|| AppError::validation("Title is required."))?;
    let source = match form.text("video_type") {
        Some(raw) => VideoSource::from_str(raw)?,
        None => VideoSource::Url,
    };
    let video_url = resolve_video(source, form, None)?;
    let order_index = match parse_rank(form) {
        Some(rank) => rank,
        None => VisualStoryRepo::next_rank(&state.pool).await?,
    };

    let record = VisualStoryRecord {
        title: title.to_string(),
        description: form.text("description").map(str::to_string),
        video_type: source.as_str().to_string(),
        video_url,
        thumbnail_url: form
            .file("thumbnail")
            .or_else(|| form.text("thumbnail_url"))
            .map(str::to_string),
        order_index,
    };
    Ok(VisualStoryRepo::create(&state.pool, &record).await?)
}

/// PUT /api/visual-stories/{id} (multipart)
///
/// Omitted fields keep their stored value. Switching from an uploaded
/// video to a URL reaps the uploaded file.
pub async fn update(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    AppPath(id): AppPath<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<VisualStory>>> {
    let existing = VisualStoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Visual story", id))?;
    let form = collect_form(&state.uploads, &mut multipart, FILE_FIELDS).await?;

    let result = update_from_form(&state, &existing, &form).await;
    if result.is_err() {
        state.uploads.reap_all(form.file_urls()).await;
    }
    let updated = result?;

    if existing.video_type == VideoSource::Upload.as_str() {
        state
            .uploads
            .reap_if_replaced(
                Some(existing.video_url.as_str()),
                Some(updated.video_url.as_str()),
            )
            .await;
    }
    if updated.video_type == VideoSource::Url.as_str() {
        state.uploads.reap_all(form.file("video")).await;
    }
    state
        .uploads
        .reap_if_replaced(
            existing.thumbnail_url.as_deref(),
            updated.thumbnail_url.as_deref(),
        )
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Visual story updated");
    Ok(ApiResponse::ok("Visual story updated.", updated))
}

async fn update_from_form(
    state: &AppState,
    existing: &VisualStory,
    form: &UploadForm,
) -> AppResult<VisualStory> {
    let source = match form.text("video_type") {
        Some(raw) => VideoSource::from_str(raw)?,
        None => VideoSource::from_str(&existing.video_type)?,
    };
    let video_url = resolve_video(source, form, Some(existing))?;

    let description = match form.raw("description") {
        Some(raw) => Some(raw.trim()).filter(|d| !d.is_empty()).map(str::to_string),
        None => existing.description.clone(),
    };
    let thumbnail_url = match (form.file("thumbnail"), form.raw("thumbnail_url")) {
        (Some(uploaded), _) => Some(uploaded.to_string()),
        (None, Some(raw)) => Some(raw.trim()).filter(|t| !t.is_empty()).map(str::to_string),
        (None, None) => existing.thumbnail_url.clone(),
    };

    let record = VisualStoryRecord {
        title: form.text("title").unwrap_or(&existing.title).to_string(),
        description,
        video_type: source.as_str().to_string(),
        video_url,
        thumbnail_url,
        order_index: parse_rank(form).unwrap_or(existing.order_index),
    };
    VisualStoryRepo::update(&state.pool, existing.id, &record)
        .await?
        .ok_or_else(|| AppError::not_found("Visual story", existing.id))
}

/// Pick the video URL for `source`, falling back to the stored value when
/// the stored story already uses the same source.
fn resolve_video(
    source: VideoSource,
    form: &UploadForm,
    existing: Option<&VisualStory>,
) -> AppResult<String> {
    let same_source = existing.filter(|s| s.video_type == source.as_str());
    let url = match source {
        VideoSource::Upload => form
            .file("video")
            .map(str::to_string)
            .or_else(|| same_source.map(|s| s.video_url.clone()))
            .ok_or_else(|| AppError::validation("A video file is required for upload type."))?,
        VideoSource::Url => form
            .text("video_url")
            .map(str::to_string)
            .or_else(|| same_source.map(|s| s.video_url.clone()))
            .ok_or_else(|| AppError::validation("video_url is required for url type."))?,
    };
    Ok(url)
}

fn parse_rank(form: &UploadForm) -> Option<Rank> {
    form.text("order_index").and_then(|v| v.parse().ok())
}

/// DELETE /api/visual-stories/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = VisualStoryRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Visual story", id))?;

    // External links are skipped by the reaper.
    state
        .uploads
        .reap_all(std::iter::once(removed.video_url).chain(removed.thumbnail_url))
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Visual story deleted");
    Ok(ApiResponse::message("Visual story deleted."))
}

/// PUT /api/visual-stories/{id}/promote
pub async fn promote(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !VisualStoryRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Visual story", id));
    }
    tracing::info!(id, admin_id = admin.admin_id, "Visual story promoted");
    Ok(ApiResponse::message("Visual story moved to top."))
}
