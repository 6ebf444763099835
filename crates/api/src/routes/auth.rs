//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register        -> register
/// POST /admin/register  -> admin_register
/// POST /login           -> login
/// POST /admin/login     -> admin_login
/// POST /logout          -> logout
/// GET  /me              -> me (fail-open)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/admin/register", post(auth::admin_register))
        .route("/login", post(auth::login))
        .route("/admin/login", post(auth::admin_login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}
