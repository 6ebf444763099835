//! REST gateway for the provider HTTP endpoints.
//!
//! Every endpoint is a POST with a JSON body, authenticated with a bearer
//! secret, answering inside a `result` envelope. The gateway performs no
//! retries; any non-2xx status, unreadable body, or missing envelope field
//! surfaces as a [`ProviderError`]. Requests carry a client-side timeout
//! because the upstream contract specifies none.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::types::{Country, Envelope, NumberOffer, ProviderMessage, ProviderSession, ResultBody};

/// Errors from the provider gateway.
///
/// The bearer secret travels in a header, never in a URL or body, so none of
/// these variants can leak it.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response parsed but the expected envelope field was absent.
    #[error("Malformed provider response: {0}")]
    Envelope(&'static str),
}

/// Remote operations the rest of the workspace programs against.
///
/// Handlers and services hold an `Arc<dyn SmsGateway>`; tests substitute a
/// stub, production wires in [`RestSmsGateway`].
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Allocate a number for the given service and open a session on it.
    async fn create_session(&self, service_id: i64) -> Result<ProviderSession, ProviderError>;

    /// Fetch a session's current state, including its embedded message if one
    /// has arrived.
    async fn session_details(&self, session_id: &str) -> Result<ProviderSession, ProviderError>;

    /// Fetch the messages received on a session.
    async fn session_messages(
        &self,
        session_id: &str,
    ) -> Result<Vec<ProviderMessage>, ProviderError>;

    /// Catalog: available countries.
    async fn list_countries(&self) -> Result<Vec<Country>, ProviderError>;

    /// Catalog: rentable number/service offers for a service.
    async fn list_numbers(&self, service_id: i64) -> Result<Vec<NumberOffer>, ProviderError>;
}

/// Production [`SmsGateway`] over `reqwest`.
pub struct RestSmsGateway {
    client: reqwest::Client,
    base_url: String,
    api_secret: String,
    timeout: Duration,
}

impl RestSmsGateway {
    /// Create a gateway for the given provider base URL and bearer secret.
    pub fn new(base_url: String, api_secret: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_secret,
            timeout,
        }
    }

    /// POST `body` to `endpoint` and unwrap the `result` envelope.
    async fn post(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<ResultBody, ProviderError> {
        tracing::debug!(endpoint, "provider request");

        let response = self
            .client
            .post(format!("{}{}", self.base_url, endpoint))
            .bearer_auth(&self.api_secret)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope = response.json().await?;
        envelope
            .result
            .ok_or(ProviderError::Envelope("missing result field"))
    }
}

#[async_trait]
impl SmsGateway for RestSmsGateway {
    async fn create_session(&self, service_id: i64) -> Result<ProviderSession, ProviderError> {
        self.post("/sms/session/create", json!({ "serviceId": service_id }))
            .await?
            .session
            .ok_or(ProviderError::Envelope("missing session in result"))
    }

    async fn session_details(&self, session_id: &str) -> Result<ProviderSession, ProviderError> {
        self.post("/sms/session", json!({ "id": session_id }))
            .await?
            .session
            .ok_or(ProviderError::Envelope("missing session in result"))
    }

    async fn session_messages(
        &self,
        session_id: &str,
    ) -> Result<Vec<ProviderMessage>, ProviderError> {
        self.post("/sms/session", json!({ "sessionId": session_id }))
            .await?
            .messages
            .ok_or(ProviderError::Envelope("missing messages in result"))
    }

    async fn list_countries(&self) -> Result<Vec<Country>, ProviderError> {
        self.post("/country/list/get", json!({}))
            .await?
            .countries
            .ok_or(ProviderError::Envelope("missing countries in result"))
    }

    async fn list_numbers(&self, service_id: i64) -> Result<Vec<NumberOffer>, ProviderError> {
        self.post("/number/list/get", json!({ "serviceId": service_id }))
            .await?
            .numbers
            .ok_or(ProviderError::Envelope("missing numbers in result"))
    }
}
