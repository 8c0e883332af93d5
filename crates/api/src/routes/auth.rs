//! Route definitions for `/auth`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login            -> login            (public, 10 per IP / 15 min)
/// POST /logout           -> logout
/// POST /forgot-password  -> forgot_password  (public, 5 per IP / hour)
/// POST /reset-password   -> reset_password   (public)
/// POST /register         -> register         (superadmin/admin)
/// POST /change-password  -> change_password
/// GET  /profile          -> get_profile
/// PUT  /profile          -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .route("/register", post(auth::register))
        .route("/change-password", post(auth::change_password))
        .route("/profile", get(auth::get_profile).put(auth::update_profile))
}
