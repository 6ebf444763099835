pub mod admin;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod rent;
pub mod session;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                      register (public)
/// /auth/admin/register                admin bootstrap (public)
/// /auth/login                         login (public)
/// /auth/admin/login                   admin login (public)
/// /auth/logout                        clear cookie
/// /auth/me                            who-am-I (fail-open)
///
/// /rent                               rent a number (fail-open auth)
/// /session/{session_id}               session details (public)
/// /messages/{session_id}              message poll (public)
///
/// /user/balance                       get, signed delta (requires auth)
/// /user/balance/deduct                debit (requires auth)
/// /user/sessions                      list, add (requires auth)
/// /user/profile                       name update (requires auth)
///
/// /catalog/countries                  provider country list (public)
/// /catalog/numbers                    provider offers (public)
///
/// /admin/users                        list all users (admin only)
/// /admin/sessions                     aggregated sessions (admin only)
/// /admin/users/{id}/balance           adjust target balance
/// /admin/users/{id}/make-admin        one-way promotion
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", user::router())
        .nest("/catalog", catalog::router())
        .nest("/admin", admin::router())
        .merge(rent::router())
        .merge(session::router())
}
