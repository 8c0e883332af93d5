//! Handlers for `/api/timeline`. Writes require a manager role.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::timeline::{Timeline, TimelineRecord};
use portfolio_db::repositories::TimelineRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::rbac::RequireManager;
use crate::query::ListParams;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::uploads::{collect_form, UploadForm};

const FILE_FIELDS: &[(&str, UploadKind)] = &[("file", UploadKind::Image)];

/// GET /api/timeline
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Timeline>>>> {
    let page = params.page_request(10);
    let (rows, total) = TimelineRepo::list(&state.pool, params.pattern().as_deref(), &page).await?;
    Ok(ApiResponse::page(
        "Timeline entries fetched.",
        rows,
        page.paginate(total),
    ))
}

/// GET /api/timeline/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Timeline>>> {
    let entry = TimelineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Timeline entry", id))?;
    Ok(ApiResponse::ok("Timeline entry fetched.", entry))
}

/// POST /api/timeline (multipart: year, title, file?)
pub async fn create(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Timeline>>)> {
    let form = collect_form(&state.uploads, &mut multipart, FILE_FIELDS).await?;

    let result = match required_fields(&form, None) {
        Ok((year, title)) => {
            let record = TimelineRecord {
                year,
                title,
                image_url: form.file("file").map(str::to_string),
            };
            TimelineRepo::create(&state.pool, &record)
                .await
                .map_err(AppError::from)
        }
        Err(e) => Err(e),
    };
    if result.is_err() {
        state.uploads.reap_all(form.file_urls()).await;
    }
    let entry = result?;

    tracing::info!(id = entry.id, year = %entry.year, admin_id = admin.admin_id, "Timeline entry created");
    Ok(ApiResponse::created("Timeline entry created.", entry))
}

/// PUT /api/timeline/{id} (multipart)
///
/// A new `file` replaces the stored image; omitted fields keep their value.
pub async fn update(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    AppPath(id): AppPath<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<Timeline>>> {
    let existing = TimelineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Timeline entry", id))?;
    let form = collect_form(&state.uploads, &mut multipart, FILE_FIELDS).await?;

    let result = match required_fields(&form, Some(&existing)) {
        Ok((year, title)) => {
            let record = TimelineRecord {
                year,
                title,
                image_url: form
                    .file("file")
                    .map(str::to_string)
                    .or_else(|| existing.image_url.clone()),
            };
            TimelineRepo::update(&state.pool, id, &record)
                .await
                .map_err(AppError::from)
                .and_then(|row| row.ok_or_else(|| AppError::not_found("Timeline entry", id)))
        }
        Err(e) => Err(e),
    };
    if result.is_err() {
        state.uploads.reap_all(form.file_urls()).await;
    }
    let updated = result?;

    state
        .uploads
        .reap_if_replaced(existing.image_url.as_deref(), updated.image_url.as_deref())
        .await;

    tracing::info!(id, admin_id = admin.admin_id, "Timeline entry updated");
    Ok(ApiResponse::ok("Timeline entry updated.", updated))
}

/// `(year, title)` from the form, defaulting to the stored row on update.
fn required_fields(form: &UploadForm, existing: Option<&Timeline>) -> AppResult<(String, String)> {
    let year = form
        .text("year")
        .or(existing.map(|t| t.year.as_str()))
        .ok_or_else(|| AppError::validation("Year and title are required."))?;
    let title = form
        .text("title")
        .or(existing.map(|t| t.title.as_str()))
        .ok_or_else(|| AppError::validation("Year and title are required."))?;
    Ok((year.to_string(), title.to_string()))
}

/// DELETE /api/timeline/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(admin): RequireManager,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = TimelineRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Timeline entry", id))?;
    state.uploads.reap_all(removed.image_url).await;

    tracing::info!(id, admin_id = admin.admin_id, "Timeline entry deleted");
    Ok(ApiResponse::message("Timeline entry deleted."))
}
