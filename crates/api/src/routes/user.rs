//! Route definitions for the `/user` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`. All require authentication.
///
/// ```text
/// GET  /balance         -> get_balance
/// POST /balance         -> update_balance (signed delta)
/// POST /balance/deduct  -> deduct_balance
/// GET  /sessions        -> list_sessions
/// POST /sessions        -> add_session (idempotent)
/// POST /profile         -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/balance",
            get(user::get_balance).post(user::update_balance),
        )
        .route("/balance/deduct", post(user::deduct_balance))
        .route(
            "/sessions",
            get(user::list_sessions).post(user::add_session),
        )
        .route("/profile", post(user::update_profile))
}
