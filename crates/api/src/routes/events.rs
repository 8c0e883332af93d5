//! Route definitions for the `/events` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                           -> list       (?status=&event_type_id=&local_body_id=&sector_id=&year=&search=)
/// POST   /                           -> create
/// GET    /by-status                  -> by_status  (?status=upcoming|ongoing|past)
/// DELETE /media/{media_id}           -> delete_media
/// GET    /{id}                       -> get_by_id
/// PUT    /{id}                       -> update
/// DELETE /{id}                       -> delete
/// POST   /{id}/content               -> replace_content
/// POST   /{id}/media                 -> add_media  (multipart: file, thumbnail)
/// POST   /{id}/youtube               -> add_youtube
/// POST   /{id}/upload-inline-image   -> upload_inline_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list).post(events::create))
        .route("/by-status", get(events::by_status))
        .route("/media/{media_id}", delete(events::delete_media))
        .route(
            "/{id}",
            get(events::get_by_id)
                .put(events::update)
                .delete(events::delete),
        )
        .route("/{id}/content", post(events::replace_content))
        .route("/{id}/media", post(events::add_media))
        .route("/{id}/youtube", post(events::add_youtube))
        .route("/{id}/upload-inline-image", post(events::upload_inline_image))
}
