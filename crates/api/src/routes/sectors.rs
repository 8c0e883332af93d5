//! Route definitions for the `/sectors` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::sectors;
use crate::state::AppState;

/// Routes mounted at `/sectors`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// POST   /upload        -> upload
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// PUT    /{id}/promote  -> promote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sectors::list).post(sectors::create))
        .route("/upload", post(sectors::upload))
        .route(
            "/{id}",
            get(sectors::get_by_id)
                .put(sectors::update)
                .delete(sectors::delete),
        )
        .route("/{id}/promote", put(sectors::promote))
}
