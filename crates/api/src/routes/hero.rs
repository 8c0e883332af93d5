//! Route definitions for `/hero`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::hero;
use crate::state::AppState;

/// Routes mounted at `/hero`.
///
/// ```text
/// GET  /        -> get     (public)
/// PUT  /        -> update
/// POST /upload  -> upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hero::get).put(hero::update))
        .route("/upload", post(hero::upload))
}
