//! Route definitions for the `/timeline` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::timeline;
use crate::state::AppState;

/// Routes mounted at `/timeline`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create  (multipart: file)
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update  (multipart: file)
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(timeline::list).post(timeline::create))
        .route(
            "/{id}",
            get(timeline::get_by_id)
                .put(timeline::update)
                .delete(timeline::delete),
        )
}
