//! Normalized view of a rented phone-number session.
//!
//! The provider's wire shapes vary (optional fields, numeric ids, embedded
//! message). [`SessionView`] is the one shape handlers return to clients:
//! opaque string id, raw plus display-formatted number, country and platform
//! descriptors with defaults applied, and a lazily-evaluated expiry.

use serde::Serialize;

use crate::types::Timestamp;

/// Provider sessions default to a 30-minute lifetime when the wire payload
/// omits `expiresAt`.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 1800;

/// Country descriptor attached to a session.
#[derive(Debug, Clone, Serialize)]
pub struct CountryView {
    pub name: String,
    pub iso_code: String,
}

impl CountryView {
    /// The catalog default used when the provider omits the country.
    pub fn default_turkey() -> Self {
        Self {
            name: "Turkey".to_string(),
            iso_code: "TR".to_string(),
        }
    }
}

/// Platform (target service) descriptor attached to a session.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformView {
    pub name: String,
}

/// A single received message with its extracted verification code.
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub sender: String,
    pub text: String,
    pub code: Option<String>,
    pub received_at: Option<Timestamp>,
}

/// Client-facing session shape.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// Provider-assigned id, opaque to clients.
    pub id: String,
    /// Raw number as the provider reports it.
    pub phone_number: String,
    /// Display form of `phone_number` (see [`crate::phone::format_msisdn`]).
    pub display_number: String,
    pub country: CountryView,
    pub platform: PlatformView,
    pub expires_at: Timestamp,
    pub message_count: i64,
    /// The provider model carries at most one message per session.
    pub message: Option<MessageView>,
}

impl SessionView {
    /// Expiry is enforced only at read time; there is no server-side reap.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}
