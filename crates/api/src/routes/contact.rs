//! Route definitions for `/contact`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// POST   /                        -> create          (public)
/// GET    /                        -> list            (?search=&category=&status=)
/// GET    /{id}                    -> get_by_id
/// DELETE /{id}                    -> delete
/// PATCH  /{id}/status             -> update_status
/// GET    /{id}/communications     -> communications
/// POST   /{id}/send-sms           -> send_sms
/// POST   /{id}/send-whatsapp      -> send_whatsapp
/// POST   /{id}/send-voice         -> send_voice
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list).post(contact::create))
        .route("/{id}", get(contact::get_by_id).delete(contact::delete))
        .route("/{id}/status", patch(contact::update_status))
        .route("/{id}/communications", get(contact::communications))
        .route("/{id}/send-sms", post(contact::send_sms))
        .route("/{id}/send-whatsapp", post(contact::send_whatsapp))
        .route("/{id}/send-voice", post(contact::send_voice))
}
