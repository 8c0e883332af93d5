//! Route definitions for the `/recognitions` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::recognitions;
use crate::state::AppState;

/// Routes mounted at `/recognitions`. Writes need the admin or manager role.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// PUT    /{id}/promote  -> promote
/// POST   /upload-icon   -> upload_icon
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recognitions::list).post(recognitions::create))
        .route("/upload-icon", post(recognitions::upload_icon))
        .route(
            "/{id}",
            put(recognitions::update).delete(recognitions::delete),
        )
        .route("/{id}/promote", put(recognitions::promote))
}
