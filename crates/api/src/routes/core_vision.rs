//! Route definitions for `/core-vision`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::core_vision;
use crate::state::AppState;

/// Routes mounted at `/core-vision`.
///
/// ```text
/// GET    /pillars               -> list
/// POST   /pillars               -> create
/// PUT    /pillars/{id}          -> update
/// DELETE /pillars/{id}          -> delete
/// PUT    /pillars/{id}/promote  -> promote
/// POST   /pillars/upload        -> upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pillars", get(core_vision::list).post(core_vision::create))
        .route("/pillars/upload", post(core_vision::upload))
        .route(
            "/pillars/{id}",
            put(core_vision::update).delete(core_vision::delete),
        )
        .route("/pillars/{id}/promote", put(core_vision::promote))
}
