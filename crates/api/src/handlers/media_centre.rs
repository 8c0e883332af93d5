//! Handlers for `/api/media-centre`: sections and the posts filed under
//! them.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::{is_blank, SectionMediaType};
use portfolio_core::search::{clamp_limit, like_pattern, PageRequest};
use portfolio_core::types::DbId;
use portfolio_core::uploads::{media_category, UploadKind};
use portfolio_db::models::media_centre::{
    MediaPost, MediaPostFilter, MediaPostInput, MediaSection, MediaSectionInput,
};
use portfolio_db::repositories::{MediaPostRepo, MediaSectionRepo};
use serde::{Deserialize, Serialize};

use super::reject_blank;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::{lenient, lenient_bool, ListParams};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::uploads::collect_form;

const LATEST_DEFAULT_LIMIT: i64 = 6;
const LATEST_MAX_LIMIT: i64 = 20;
const POSTS_DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct LatestParams {
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PostListParams {
    #[serde(default, deserialize_with = "lenient")]
    pub section_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_featured: Option<bool>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
}

/// Result of `POST /api/media-centre/upload`.
#[derive(Debug, Serialize)]
pub struct UploadedMedia {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// GET /api/media-centre/sections
pub async fn list_sections(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<MediaSection>>>> {
    let sections = MediaSectionRepo::list(&state.pool, true).await?;
    Ok(ApiResponse::ok("Sections fetched.", sections))
}

/// GET /api/media-centre/sections/all
pub async fn list_all_sections(
    State(state): State<AppState>,
    _admin: AuthAdmin,
) -> AppResult<Json<ApiResponse<Vec<MediaSection>>>> {
    let sections = MediaSectionRepo::list(&state.pool, false).await?;
    Ok(ApiResponse::ok("Sections fetched.", sections))
}

/// POST /api/media-centre/sections
pub async fn create_section(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<MediaSectionInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<MediaSection>>)> {
    if is_blank(input.section_name.as_deref()) {
        return Err(AppError::validation("Section name is required."));
    }
    let media_type = match input.media_type.as_deref().map(str::trim) {
        None | Some("") => SectionMediaType::Article,
        Some(raw) => SectionMediaType::from_str(raw)?,
    };
    let section = MediaSectionRepo::create(&state.pool, &input, media_type.as_str()).await?;
    tracing::info!(id = section.id, admin_id = admin.admin_id, "Media section created");
    Ok(ApiResponse::created("Section created.", section))
}

/// PUT /api/media-centre/sections/{id}
pub async fn update_section(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<MediaSectionInput>,
) -> AppResult<Json<ApiResponse<MediaSection>>> {
    reject_blank(input.section_name.as_deref(), "Section name cannot be empty.")?;
    let media_type = match input.media_type.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(SectionMediaType::from_str(raw)?),
    };
    let section = MediaSectionRepo::update(&state.pool, id, &input, media_type.map(|m| m.as_str()))
        .await?
        .ok_or_else(|| AppError::not_found("Media section", id))?;
    tracing::info!(id, admin_id = admin.admin_id, "Media section updated");
    Ok(ApiResponse::ok("Section updated.", section))
}

/// DELETE /api/media-centre/sections/{id}
///
/// Posts cascade with the section; their thumbnails are reaped.
pub async fn delete_section(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let thumbnails = MediaSectionRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Media section", id))?;
    state.uploads.reap_all(&thumbnails).await;
    tracing::info!(id, reaped = thumbnails.len(), admin_id = admin.admin_id, "Media section deleted");
    Ok(ApiResponse::message("Section deleted."))
}

/// PUT /api/media-centre/sections/{id}/promote
pub async fn promote_section(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !MediaSectionRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Media section", id));
    }
    Ok(ApiResponse::message("Section moved to top."))
}

/// GET /api/media-centre/sections/{id}/posts
///
/// Public; an inactive section is reported as missing.
pub async fn section_posts(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<MediaPost>>>> {
    let section = MediaSectionRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|s| s.is_active)
        .ok_or_else(|| AppError::not_found("Media section", id))?;

    let page = params.page_request(POSTS_DEFAULT_LIMIT);
    let filter = MediaPostFilter {
        section_id: Some(section.id),
        is_featured: None,
        search: params.pattern(),
    };
    let (posts, total) = MediaPostRepo::list(&state.pool, &filter, &page).await?;
    Ok(ApiResponse::page(
        format!("Posts in {} fetched.", section.section_name),
        posts,
        page.paginate(total),
    ))
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// GET /api/media-centre/latest?limit=
pub async fn latest(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LatestParams>,
) -> AppResult<Json<ApiResponse<Vec<MediaPost>>>> {
    let limit = clamp_limit(params.limit, LATEST_DEFAULT_LIMIT, LATEST_MAX_LIMIT);
    let posts = MediaPostRepo::latest(&state.pool, limit).await?;
    Ok(ApiResponse::ok("Latest posts fetched.", posts))
}

/// GET /api/media-centre/posts
pub async fn list_posts(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppQuery(params): AppQuery<PostListParams>,
) -> AppResult<Json<ApiResponse<Vec<MediaPost>>>> {
    let page = PageRequest::new(params.page, params.limit, POSTS_DEFAULT_LIMIT);
    let filter = MediaPostFilter {
        section_id: params.section_id,
        is_featured: params.is_featured,
        search: like_pattern(params.search.as_deref()),
    };
    let (posts, total) = MediaPostRepo::list(&state.pool, &filter, &page).await?;
    Ok(ApiResponse::page("Posts fetched.", posts, page.paginate(total)))
}

/// GET /api/media-centre/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<MediaPost>>> {
    let post = MediaPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Post", id))?;
    Ok(ApiResponse::ok("Post fetched.", post))
}

/// POST /api/media-centre/posts
pub async fn create_post(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<MediaPostInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<MediaPost>>)> {
    let section_id = input
        .section_id
        .ok_or_else(|| AppError::validation("section_id and title are required."))?;
    if is_blank(input.title.as_deref()) {
        return Err(AppError::validation("section_id and title are required."));
    }
    ensure_section(&state, section_id).await?;

    let post = MediaPostRepo::create(&state.pool, &input).await?;
    tracing::info!(id = post.id, section_id, admin_id = admin.admin_id, "Media post created");
    Ok(ApiResponse::created("Post created.", post))
}

/// PUT /api/media-centre/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<MediaPostInput>,
) -> AppResult<Json<ApiResponse<MediaPost>>> {
    reject_blank(input.title.as_deref(), "Title cannot be empty.")?;
    if let Some(section_id) = input.section_id {
        ensure_section(&state, section_id).await?;
    }
    let existing = MediaPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Post", id))?;
    let updated = MediaPostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Post", id))?;
    state
        .uploads
        .reap_if_replaced(
            existing.thumbnail_url.as_deref(),
            updated.thumbnail_url.as_deref(),
        )
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Media post updated");
    Ok(ApiResponse::ok("Post updated.", updated))
}

/// DELETE /api/media-centre/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let thumbnail = MediaPostRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Post", id))?;
    state.uploads.reap_all(thumbnail).await;
    tracing::info!(id, admin_id = admin.admin_id, "Media post deleted");
    Ok(ApiResponse::message("Post deleted."))
}

async fn ensure_section(state: &AppState, id: DbId) -> AppResult<()> {
    if MediaSectionRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found("Media section", id));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// POST /api/media-centre/upload
///
/// Accepts an image or a video and reports which one it was.
pub async fn upload(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedMedia>>> {
    let form = collect_form(&state.uploads, &mut multipart, &[("file", UploadKind::Media)]).await?;
    let url = form
        .file("file")
        .ok_or_else(|| AppError::BadRequest("No file uploaded.".into()))?
        .to_string();
    let kind = form
        .content_type("file")
        .and_then(media_category)
        .unwrap_or("image");

    tracing::info!(url = %url, kind, "Media centre file uploaded");
    Ok(ApiResponse::ok("File uploaded.", UploadedMedia { url, kind }))
}
