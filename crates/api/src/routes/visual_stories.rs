//! Route definitions for the `/visual-stories` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::visual_stories;
use crate::state::AppState;

/// Routes mounted at `/visual-stories`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create   (multipart: video, thumbnail)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update   (multipart: video, thumbnail)
/// DELETE /{id}          -> delete
/// PUT    /{id}/promote  -> promote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(visual_stories::list).post(visual_stories::create))
        .route(
            "/{id}",
            get(visual_stories::get_by_id)
                .put(visual_stories::update)
                .delete(visual_stories::delete),
        )
        .route("/{id}/promote", put(visual_stories::promote))
}
