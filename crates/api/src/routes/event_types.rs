//! Route definitions for the `/event-types` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::event_types;
use crate::state::AppState;

/// Routes mounted at `/event-types`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event_types::list).post(event_types::create))
        .route("/{id}", put(event_types::update).delete(event_types::delete))
}
