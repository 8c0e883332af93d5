pub mod achievements;
pub mod auth;
pub mod contact;
pub mod core_vision;
pub mod ente_nadu;
pub mod event_types;
pub mod events;
pub mod gallery;
pub mod health;
pub mod hero;
pub mod local_bodies;
pub mod manifesto;
pub mod media_centre;
pub mod projects;
pub mod recognitions;
pub mod sectors;
pub mod timeline;
pub mod visual_stories;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy (see each module for the per-resource tables):
///
/// ```text
/// /auth                       login, logout, password reset, register, profile
///
/// /achievements               ranked list with icons
/// /core-vision/pillars        ranked list with images
/// /ente-nadu                  ranked cards with icons
/// /ente-nadu-testimonials     text/video testimonials
/// /manifesto                  development goals, long-term commitments
/// /recognitions               ranked list (manager role for writes)
/// /visual-stories             url or uploaded videos (manager role)
/// /timeline                   dated milestones (manager role)
///
/// /sectors                    taxonomy with icons
/// /local-bodies               local bodies and their wards
/// /event-types                event taxonomy
/// /events                     events, content paragraphs, media, status filter
/// /gallery                    public photo/video browsing, admin media and files
/// /media-centre               sections and posts
/// /projects                   admin list, public listings by year/local body/sector
/// /hero                       landing banner
/// /contact                    enquiries and follow-up messages
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/achievements", achievements::router())
        .nest("/core-vision", core_vision::router())
        .nest("/ente-nadu", ente_nadu::cards_router())
        .nest("/ente-nadu-testimonials", ente_nadu::testimonials_router())
        .nest("/manifesto", manifesto::router())
        .nest("/recognitions", recognitions::router())
        .nest("/visual-stories", visual_stories::router())
        .nest("/timeline", timeline::router())
        .nest("/sectors", sectors::router())
        .nest("/local-bodies", local_bodies::router())
        .nest("/event-types", event_types::router())
        .nest("/events", events::router())
        .nest("/gallery", gallery::router())
        .nest("/media-centre", media_centre::router())
        .nest("/projects", projects::router())
        .nest("/hero", hero::router())
        .nest("/contact", contact::router())
}
