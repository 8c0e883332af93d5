//! Route definitions for the `/projects` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /all                        -> list_all   (?search=&sector_id=&local_body_id=&year=&is_active=)
/// POST   /                           -> create
/// POST   /upload                     -> upload
/// GET    /{id}                       -> get_by_id
/// PUT    /{id}                       -> update
/// DELETE /{id}                       -> delete
/// PUT    /{id}/promote               -> promote
/// POST   /{id}/upload-inline-image   -> upload_inline_image
///
/// GET    /public/year/{year}         -> public_by_year
/// GET    /public/local-body/{id}     -> public_by_local_body
/// GET    /public/sector/{id}         -> public_by_sector
/// GET    /public/search              -> public_search  (?q=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(projects::create))
        .route("/all", get(projects::list_all))
        .route("/upload", post(projects::upload))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/{id}/promote", put(projects::promote))
        .route("/{id}/upload-inline-image", post(projects::upload_inline_image))
        .route("/public/year/{year}", get(projects::public_by_year))
        .route("/public/local-body/{id}", get(projects::public_by_local_body))
        .route("/public/sector/{id}", get(projects::public_by_sector))
        .route("/public/search", get(projects::public_search))
}
