//! Handlers for `/api/projects`.
//!
//! Admin routes see every project; the `/public/*` routes only list
//! active ones.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::is_blank;
use portfolio_core::search::{like_pattern, PageRequest};
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::project::{Project, ProjectFilter, ProjectInput};
use portfolio_db::repositories::ProjectRepo;
use serde::Deserialize;

use super::{reject_blank, upload_file};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::{lenient, lenient_bool};
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;
use crate::uploads::store_single;

const DEFAULT_LIMIT: i64 = 12;

#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sector_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient")]
    pub local_body_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
}

/// `?q=&page=&limit=` for the public search.
#[derive(Debug, Deserialize)]
pub struct PublicSearchParams {
    pub q: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/projects/all
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppQuery(params): AppQuery<ProjectListParams>,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let page = PageRequest::new(params.page, params.limit, DEFAULT_LIMIT);
    let filter = ProjectFilter {
        search: like_pattern(params.search.as_deref()),
        sector_id: params.sector_id,
        local_body_id: params.local_body_id,
        year: params.year,
        is_active: params.is_active,
    };
    let (projects, total) = ProjectRepo::list(&state.pool, &filter, &page).await?;
    Ok(ApiResponse::page("Projects fetched.", projects, page.paginate(total)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    Ok(ApiResponse::ok("Project fetched.", project))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<ProjectInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Project>>)> {
    if is_blank(input.title.as_deref()) {
        return Err(AppError::validation("Title is required."));
    }
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(id = project.id, admin_id = admin.admin_id, "Project created");
    Ok(ApiResponse::created("Project created.", project))
}

/// PUT /api/projects/{id}
///
/// Partial update. Images missing from a replacement `images` array are
/// reaped.
pub async fn update(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ProjectInput>,
) -> AppResult<Json<ApiResponse<Project>>> {
    reject_blank(input.title.as_deref(), "Title cannot be empty.")?;
    let existing = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    let updated = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;

    let dropped = dropped_images(&existing.images, &updated.images);
    state.uploads.reap_all(&dropped).await;

    tracing::info!(id, reaped = dropped.len(), admin_id = admin.admin_id, "Project updated");
    Ok(ApiResponse::ok("Project updated.", updated))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let images = ProjectRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    state.uploads.reap_all(&images).await;
    tracing::info!(id, admin_id = admin.admin_id, "Project deleted");
    Ok(ApiResponse::message("Project deleted."))
}

/// PUT /api/projects/{id}/promote
pub async fn promote(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !ProjectRepo::promote(&state.pool, id).await? {
        return Err(AppError::not_found("Project", id));
    }
    Ok(ApiResponse::message("Project moved to top."))
}

/// POST /api/projects/upload
pub async fn upload(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    upload_file(&state, multipart, UploadKind::Image, "Image uploaded.").await
}

/// POST /api/projects/{id}/upload-inline-image
///
/// Stores an image for the rich-text body and returns its absolute URL.
pub async fn upload_inline_image(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    let url = store_single(&state.uploads, &mut multipart, UploadKind::Image).await?;
    if !ProjectRepo::exists(&state.pool, id).await? {
        state.uploads.reap(&url).await;
        return Err(AppError::not_found("Project", id));
    }
    Ok(ApiResponse::ok(
        "Image uploaded.",
        UploadedFile {
            url: state.uploads.absolute_url(&url),
        },
    ))
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/projects/public/year/{year}
pub async fn public_by_year(
    State(state): State<AppState>,
    AppPath(year): AppPath<i32>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let filter = ProjectFilter {
        year: Some(year),
        ..active()
    };
    public_page(&state, filter, &params, format!("Projects for {year} fetched.")).await
}

/// GET /api/projects/public/local-body/{id}
pub async fn public_by_local_body(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let filter = ProjectFilter {
        local_body_id: Some(id),
        ..active()
    };
    public_page(&state, filter, &params, "Projects fetched.".into()).await
}

/// GET /api/projects/public/sector/{id}
pub async fn public_by_sector(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let filter = ProjectFilter {
        sector_id: Some(id),
        ..active()
    };
    public_page(&state, filter, &params, "Projects fetched.".into()).await
}

/// GET /api/projects/public/search?q=
pub async fn public_search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PublicSearchParams>,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let pattern = like_pattern(params.q.as_deref())
        .ok_or_else(|| AppError::validation("Search query is required."))?;
    let filter = ProjectFilter {
        search: Some(pattern),
        ..active()
    };
    let page = PageParams {
        page: params.page,
        limit: params.limit,
    };
    public_page(&state, filter, &page, "Search results fetched.".into()).await
}

fn active() -> ProjectFilter {
    ProjectFilter {
        is_active: Some(true),
        ..Default::default()
    }
}

async fn public_page(
    state: &AppState,
    filter: ProjectFilter,
    params: &PageParams,
    message: String,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let page = PageRequest::new(params.page, params.limit, DEFAULT_LIMIT);
    let (projects, total) = ProjectRepo::list(&state.pool, &filter, &page).await?;
    Ok(ApiResponse::page(message, projects, page.paginate(total)))
}

/// Image URLs present in `old` but absent from `new`.
pub fn dropped_images(old: &[String], new: &[String]) -> Vec<String> {
    old.iter()
        .filter(|url| !url.trim().is_empty() && !new.contains(url))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dropped_images_keeps_only_removed_urls() {
        let old = urls(&["/uploads/a.jpg", "/uploads/b.jpg", "/uploads/c.jpg"]);
        let new = urls(&["/uploads/c.jpg", "/uploads/a.jpg", "/uploads/d.jpg"]);
        assert_eq!(dropped_images(&old, &new), urls(&["/uploads/b.jpg"]));
    }

    #[test]
    fn unchanged_array_drops_nothing() {
        let old = urls(&["/uploads/a.jpg"]);
        assert!(dropped_images(&old, &old).is_empty());
    }

    #[test]
    fn blank_entries_are_never_reaped() {
        let old = urls(&["", "/uploads/a.jpg"]);
        assert_eq!(dropped_images(&old, &[]), urls(&["/uploads/a.jpg"]));
    }
}
