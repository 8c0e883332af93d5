//! Route definitions for `/local-bodies` and their wards.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::local_bodies;
use crate::state::AppState;

/// Routes mounted at `/local-bodies`.
///
/// ```text
/// GET    /                               -> list
/// POST   /                               -> create
/// POST   /upload                         -> upload
/// GET    /{id}                           -> get_by_id
/// PUT    /{id}                           -> update
/// DELETE /{id}                           -> delete
///
/// GET    /{local_body_id}/wards          -> list_wards  (?search=&page=&limit=)
/// POST   /{local_body_id}/wards          -> create_ward
/// PUT    /{local_body_id}/wards/{id}     -> update_ward
/// DELETE /{local_body_id}/wards/{id}     -> delete_ward
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(local_bodies::list).post(local_bodies::create))
        .route("/upload", post(local_bodies::upload))
        .route(
            "/{local_body_id}",
            get(local_bodies::get_by_id)
                .put(local_bodies::update)
                .delete(local_bodies::delete),
        )
        .route(
            "/{local_body_id}/wards",
            get(local_bodies::list_wards).post(local_bodies::create_ward),
        )
        .route(
            "/{local_body_id}/wards/{id}",
            put(local_bodies::update_ward).delete(local_bodies::delete_ward),
        )
}
