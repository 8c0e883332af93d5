//! Route definitions for the `/achievements` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::achievements;
use crate::state::AppState;

/// Routes mounted at `/achievements`.
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
        .route("/", get(achievements::list).post(achievements::create))
        .route("/upload-icon", post(achievements::upload_icon))
        .route(
            "/{id}",
            put(achievements::update).delete(achievements::delete),
        )
        .route("/{id}/promote", put(achievements::promote))
}
