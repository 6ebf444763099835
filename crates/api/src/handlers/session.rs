//! Handlers for the session read path: session details and message polling.
//!
//! Both routes are public (the session id is the capability) and both honor
//! the degraded-mode switch: with `DEMO_FALLBACK` on, an upstream failure
//! yields demonstration data explicitly flagged `"degraded": true` instead of
//! a 500. The flag is never silent and the rental/billing path never uses
//! this fallback.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{Duration, Utc};
use numrent_core::session::{CountryView, MessageView, PlatformView, SessionView};
use numrent_core::types::Timestamp;
use serde::Serialize;

use crate::error::AppResult;
use crate::services::rental::{normalize_message, normalize_session};
use crate::state::AppState;

/// Response envelope for `GET /session/{session_id}`.
#[derive(Debug, Serialize)]
pub struct SessionEnvelope {
    pub session: SessionView,
    /// True when the payload is demonstration data, not provider truth.
    pub degraded: bool,
}

/// Response envelope for `GET /messages/{session_id}`.
///
/// `fetched_at` stamps the poll so clients can discard a slow response that
/// arrives after a newer one ("latest poll wins" needs a tiebreaker).
#[derive(Debug, Serialize)]
pub struct MessagesEnvelope {
    pub messages: Vec<MessageView>,
    pub fetched_at: Timestamp,
    pub degraded: bool,
}

/// GET /api/v1/session/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<SessionEnvelope>> {
    match state.gateway.session_details(&session_id).await {
        Ok(raw) => Ok(Json(SessionEnvelope {
            session: normalize_session(raw, Utc::now(), &state.config.provider.service_name),
            degraded: false,
        })),
        Err(err) if state.config.demo_fallback => {
            tracing::warn!(%session_id, error = %err, "provider unavailable; serving demo session");
            Ok(Json(SessionEnvelope {
                session: demo_session(&session_id),
                degraded: true,
            }))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /api/v1/messages/{session_id}
///
/// The client polls this every 15 seconds while waiting for the code.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<MessagesEnvelope>> {
    match state.gateway.session_messages(&session_id).await {
        Ok(raw) => Ok(Json(MessagesEnvelope {
            messages: raw.into_iter().map(normalize_message).collect(),
            fetched_at: Utc::now(),
            degraded: false,
        })),
        Err(err) if state.config.demo_fallback => {
            tracing::warn!(%session_id, error = %err, "provider unavailable; serving demo messages");
            Ok(Json(MessagesEnvelope {
                messages: vec![demo_message()],
                fetched_at: Utc::now(),
                degraded: true,
            }))
        }
        Err(err) => Err(err.into()),
    }
}

// ---------------------------------------------------------------------------
// Demonstration data (degraded mode only)
// ---------------------------------------------------------------------------

fn demo_session(session_id: &str) -> SessionView {
    SessionView {
        id: session_id.to_string(),
        phone_number: "905551234567".to_string(),
        display_number: "+90 555 123 4567".to_string(),
        country: CountryView::default_turkey(),
        platform: PlatformView {
            name: "Instagram".to_string(),
        },
        expires_at: Utc::now() + Duration::minutes(30),
        message_count: 1,
        message: Some(demo_message()),
    }
}

fn demo_message() -> MessageView {
    MessageView {
        sender: "INSTAGRAM".to_string(),
        text: "Instagram 142323. Don't share it.".to_string(),
        code: Some("142323".to_string()),
        received_at: Some(Utc::now() - Duration::minutes(5)),
    }
}
