//! Route definitions for the Ente Nadu cards and testimonials.
//!
//! Two routers are provided:
//! - `cards_router()` mounted at `/ente-nadu`
//! - `testimonials_router()` mounted at `/ente-nadu-testimonials`

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{ente_nadu, testimonials};
use crate::state::AppState;

/// Card routes mounted at `/ente-nadu`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// PUT    /{id}/promote  -> promote
/// POST   /upload-icon   -> upload_icon
/// ```
pub fn cards_router() -> Router<AppState> {
    Router::new()
        .route("/", get(ente_nadu::list).post(ente_nadu::create))
        .route("/upload-icon", post(ente_nadu::upload_icon))
        .route("/{id}", put(ente_nadu::update).delete(ente_nadu::delete))
        .route("/{id}/promote", put(ente_nadu::promote))
}

/// Testimonial routes mounted at `/ente-nadu-testimonials`.
///
/// ```text
/// GET    /              -> list  (?type=&search=&page=&limit=)
/// POST   /              -> create
/// POST   /upload        -> upload
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// PUT    /{id}/promote  -> promote
/// ```
pub fn testimonials_router() -> Router<AppState> {
    Router::new()
        .route("/", get(testimonials::list).post(testimonials::create))
        .route("/upload", post(testimonials::upload))
        .route(
            "/{id}",
            get(testimonials::get_by_id)
                .put(testimonials::update)
                .delete(testimonials::delete),
        )
        .route("/{id}/promote", put(testimonials::promote))
}
