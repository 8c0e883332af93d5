//! Route definitions for `/gallery`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/gallery`.
///
/// ```text
/// GET    /images                      -> images              (?q=&search=&page=&limit=)
/// GET    /images/local-body/{id}      -> images_by_local_body
/// GET    /images/sector/{id}          -> images_by_sector
/// GET    /images/year/{year}          -> images_by_year
/// GET    /images/search               -> search_images       (?q=)
/// GET    /videos                      -> videos
/// GET    /videos/local-body/{id}      -> videos_by_local_body
/// GET    /videos/sector/{id}          -> videos_by_sector
/// GET    /videos/year/{year}          -> videos_by_year
/// GET    /videos/search               -> search_videos       (?q=)
///
/// GET    /admin/media                 -> admin_media         (auth)
/// DELETE /admin/media/{id}            -> admin_delete_media  (auth)
/// GET    /admin/files                 -> admin_files         (auth)
/// DELETE /admin/files/{filename}      -> admin_delete_file   (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images", get(gallery::images))
        .route("/images/local-body/{id}", get(gallery::images_by_local_body))
        .route("/images/sector/{id}", get(gallery::images_by_sector))
        .route("/images/year/{year}", get(gallery::images_by_year))
        .route("/images/search", get(gallery::search_images))
        .route("/videos", get(gallery::videos))
        .route("/videos/local-body/{id}", get(gallery::videos_by_local_body))
        .route("/videos/sector/{id}", get(gallery::videos_by_sector))
        .route("/videos/year/{year}", get(gallery::videos_by_year))
        .route("/videos/search", get(gallery::search_videos))
        .route("/admin/media", get(gallery::admin_media))
        .route("/admin/media/{id}", delete(gallery::admin_delete_media))
        .route("/admin/files", get(gallery::admin_files))
        .route("/admin/files/{filename}", delete(gallery::admin_delete_file))
}
