//! Route definitions for `/manifesto`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::manifesto;
use crate::state::AppState;

/// Routes mounted at `/manifesto`.
///
/// ```text
/// GET    /development-goals                    -> list_goals
/// POST   /development-goals                    -> create_goal
/// PUT    /development-goals/{id}               -> update_goal
/// DELETE /development-goals/{id}               -> delete_goal
/// PUT    /development-goals/{id}/promote       -> promote_goal
///
/// GET    /long-term-commitments                -> list_commitments
/// POST   /long-term-commitments                -> create_commitment
/// POST   /long-term-commitments/upload         -> upload_commitment_icon
/// PUT    /long-term-commitments/{id}           -> update_commitment
/// DELETE /long-term-commitments/{id}           -> delete_commitment
/// PUT    /long-term-commitments/{id}/promote   -> promote_commitment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/development-goals",
            get(manifesto::list_goals).post(manifesto::create_goal),
        )
        .route(
            "/development-goals/{id}",
            put(manifesto::update_goal).delete(manifesto::delete_goal),
        )
        .route("/development-goals/{id}/promote", put(manifesto::promote_goal))
        .route(
            "/long-term-commitments",
            get(manifesto::list_commitments).post(manifesto::create_commitment),
        )
        .route(
            "/long-term-commitments/upload",
            post(manifesto::upload_commitment_icon),
        )
        .route(
            "/long-term-commitments/{id}",
            put(manifesto::update_commitment).delete(manifesto::delete_commitment),
        )
        .route(
            "/long-term-commitments/{id}/promote",
            put(manifesto::promote_commitment),
        )
}
