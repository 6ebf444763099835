//! Route definition for `POST /rent`.

use axum::routing::post;
use axum::Router;

use crate::handlers::rent;
use crate::state::AppState;

/// `POST /rent` -- the rental orchestrator entry point.
pub fn router() -> Router<AppState> {
    Router::new().route("/rent", post(rent::rent))
}
