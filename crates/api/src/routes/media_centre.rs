//! Route definitions for `/media-centre`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::media_centre;
use crate::state::AppState;

/// Routes mounted at `/media-centre`.
///
/// ```text
/// GET    /sections                  -> list_sections       (public, active only)
/// POST   /sections                  -> create_section
/// GET    /sections/all              -> list_all_sections
/// PUT    /sections/{id}             -> update_section
/// DELETE /sections/{id}             -> delete_section
/// PUT    /sections/{id}/promote     -> promote_section
/// GET    /sections/{id}/posts       -> section_posts       (public)
///
/// GET    /latest                    -> latest              (public, ?limit=)
/// GET    /posts                     -> list_posts          (?section_id=&is_featured=&search=)
/// POST   /posts                     -> create_post
/// GET    /posts/{id}                -> get_post            (public)
/// PUT    /posts/{id}                -> update_post
/// DELETE /posts/{id}                -> delete_post
///
/// POST   /upload                    -> upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/sections",
            get(media_centre::list_sections).post(media_centre::create_section),
        )
        .route("/sections/all", get(media_centre::list_all_sections))
        .route(
            "/sections/{id}",
            put(media_centre::update_section).delete(media_centre::delete_section),
        )
        .route("/sections/{id}/promote", put(media_centre::promote_section))
        .route("/sections/{id}/posts", get(media_centre::section_posts))
        .route("/latest", get(media_centre::latest))
        .route(
            "/posts",
            get(media_centre::list_posts).post(media_centre::create_post),
        )
        .route(
            "/posts/{id}",
            get(media_centre::get_post)
                .put(media_centre::update_post)
                .delete(media_centre::delete_post),
        )
        .route("/upload", post(media_centre::upload))
}
