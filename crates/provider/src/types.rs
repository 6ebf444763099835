//! Wire types for the provider API.
//!
//! The provider is loose with its payloads: session ids arrive as numbers or
//! strings depending on the endpoint, the embedded message uses `text` where
//! the message list uses `content`, and most descriptor fields are optional.
//! The types here absorb that variance; normalization into the client-facing
//! shape happens in the rental service.

use numrent_core::types::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level response wrapper. A missing `result` key is a protocol error.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub result: Option<ResultBody>,
}

/// The `result` payload. Exactly one of the fields is populated per endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBody {
    pub session: Option<ProviderSession>,
    pub messages: Option<Vec<ProviderMessage>>,
    pub countries: Option<Vec<Country>>,
    pub numbers: Option<Vec<NumberOffer>>,
}

/// A rented session as the provider reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSession {
    /// Numeric on the wire, opaque string everywhere else.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub phone_number: String,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    #[serde(default)]
    pub message_count: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub message: Option<ProviderMessage>,
}

/// A received SMS. The embedded single-message form uses `text`; the message
/// list uses `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMessage {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(alias = "text")]
    pub content: String,
    #[serde(default)]
    pub received_at: Option<Timestamp>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Catalog country descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub iso_code: Option<String>,
    #[serde(default)]
    pub phone_prefix: Option<String>,
}

/// Target-service descriptor attached to sessions and offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// One rentable number/service offer from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberOffer {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub amount: Option<OfferAmount>,
    #[serde(default)]
    pub max_reuse: Option<i64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Session lifetime for this offer, in seconds.
    #[serde(default)]
    pub usage_timeout: Option<i64>,
    #[serde(default)]
    pub reuse_timeout: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Pricing block of an offer. The provider sends decimal strings ("0.30");
/// they are passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferAmount {
    #[serde(default)]
    pub usage_amount: Option<String>,
    #[serde(default)]
    pub reuse_amount: Option<String>,
    #[serde(default)]
    pub usage_discounted_amount: Option<String>,
    #[serde(default)]
    pub reuse_discounted_amount: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }
    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}
