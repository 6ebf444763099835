//! Route definitions for the public session read path.

use axum::routing::get;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// ```text
/// GET /session/{session_id}   -> get_session
/// GET /messages/{session_id}  -> get_messages (poll target)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session/{session_id}", get(session::get_session))
        .route("/messages/{session_id}", get(session::get_messages))
}
