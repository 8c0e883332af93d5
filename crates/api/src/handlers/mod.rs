//! HTTP handlers, one module per resource.
//!
//! Handlers validate input, call the repositories, trigger the upload
//! reaper for replaced or deleted files, and wrap results in
//! [`ApiResponse`](crate::response::ApiResponse).

pub mod achievements;
pub mod auth;
pub mod contact;
pub mod core_vision;
pub mod ente_nadu;
pub mod event_types;
pub mod events;
pub mod gallery;
pub mod hero;
pub mod local_bodies;
pub mod manifesto;
pub mod media_centre;
pub mod projects;
pub mod recognitions;
pub mod sectors;
pub mod testimonials;
pub mod timeline;
pub mod visual_stories;

use axum::extract::Multipart;
use axum::Json;
use portfolio_core::content::is_blank;
use portfolio_core::uploads::UploadKind;

use crate::error::{AppError, AppResult};
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;
use crate::uploads::store_single;

/// Shared body of every single-file `POST .../upload` endpoint.
pub(crate) async fn upload_file(
    state: &AppState,
    mut multipart: Multipart,
    kind: UploadKind,
    message: &str,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    let url = store_single(&state.uploads, &mut multipart, kind).await?;
    tracing::info!(url = %url, ?kind, "File uploaded");
    Ok(ApiResponse::ok(message, UploadedFile { url }))
}

/// Reject an update that explicitly sends a blank value for a required
/// field. Omitting the field keeps the stored value.
pub(crate) fn reject_blank(value: Option<&str>, message: &str) -> AppResult<()> {
    if value.is_some() && is_blank(value) {
        return Err(AppError::validation(message));
    }
    Ok(())
}
