//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the admin flag (enforced by handler extractors).
///
/// ```text
/// GET  /users                    -> list_users
/// GET  /sessions                 -> list_sessions (aggregator)
/// POST /users/{id}/balance       -> adjust_user_balance
/// POST /users/{id}/make-admin    -> make_admin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/sessions", get(admin::list_sessions))
        .route("/users/{id}/balance", post(admin::adjust_user_balance))
        .route("/users/{id}/make-admin", post(admin::make_admin))
}
