//! Route definitions for the `/catalog` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`.
///
/// ```text
/// GET /countries -> countries
/// GET /numbers   -> numbers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/countries", get(catalog::countries))
        .route("/numbers", get(catalog::numbers))
}
