//! Shared test harness: stub provider gateway, router construction, and
//! request helpers.
//!
//! Mirrors the router construction in `main.rs` (via `build_app_router`) so
//! integration tests exercise the same middleware stack that production uses.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use numrent_api::auth::jwt::JwtConfig;
use numrent_api::auth::password::hash_password;
use numrent_api::config::{ProviderConfig, ServerConfig};
use numrent_api::router::build_app_router;
use numrent_api::state::AppState;
use numrent_db::models::user::{CreateUser, User};
use numrent_db::repositories::UserRepo;
use numrent_provider::{
    Country, NumberOffer, ProviderError, ProviderMessage, ProviderSession, SmsGateway,
};

// ---------------------------------------------------------------------------
// Stub provider gateway
// ---------------------------------------------------------------------------

/// In-memory [`SmsGateway`] with scriptable failures.
#[derive(Default)]
pub struct StubGateway {
    /// Number of `create_session` calls observed.
    pub create_calls: AtomicI64,
    /// Session ids whose detail/message lookups should fail.
    pub fail_session_ids: Vec<String>,
    /// Fail every operation (provider outage).
    pub fail_all: bool,
}

impl StubGateway {
    fn check(&self, session_id: &str) -> Result<(), ProviderError> {
        if self.fail_all || self.fail_session_ids.iter().any(|s| s == session_id) {
            return Err(provider_down());
        }
        Ok(())
    }
}

#[async_trait]
impl SmsGateway for StubGateway {
    async fn create_session(&self, _service_id: i64) -> Result<ProviderSession, ProviderError> {
        if self.fail_all {
            return Err(provider_down());
        }
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(stub_session(&format!("9000{n}")))
    }

    async fn session_details(&self, session_id: &str) -> Result<ProviderSession, ProviderError> {
        self.check(session_id)?;
        Ok(stub_session(session_id))
    }

    async fn session_messages(
        &self,
        session_id: &str,
    ) -> Result<Vec<ProviderMessage>, ProviderError> {
        self.check(session_id)?;
        Ok(vec![stub_message()])
    }

    async fn list_countries(&self) -> Result<Vec<Country>, ProviderError> {
        if self.fail_all {
            return Err(provider_down());
        }
        Ok(vec![Country {
            id: Some(1),
            name: "Turkey".to_string(),
            iso_code: Some("TR".to_string()),
            phone_prefix: Some("90".to_string()),
        }])
    }

    async fn list_numbers(&self, _service_id: i64) -> Result<Vec<NumberOffer>, ProviderError> {
        if self.fail_all {
            return Err(provider_down());
        }
        Ok(Vec::new())
    }
}

/// The canonical stub session payload: Turkish number, no embedded message.
pub fn stub_session(id: &str) -> ProviderSession {
    ProviderSession {
        id: id.to_string(),
        phone_number: "905551234567".to_string(),
        expires_at: None,
        message_count: None,
        status: Some("active".to_string()),
        country: None,
        platform: None,
        message: None,
    }
}

/// A message whose code must come from extraction, not the provider.
pub fn stub_message() -> ProviderMessage {
    ProviderMessage {
        id: Some("m1".to_string()),
        sender: Some("INSTAGRAM".to_string()),
        content: "Instagram 142323. Don't share it.".to_string(),
        received_at: None,
        code: None,
    }
}

fn provider_down() -> ProviderError {
    ProviderError::Api {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults: 25.00 rental price,
/// demo fallback off, insecure cookie (no TLS in tests).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        rental_price: Decimal::new(2500, 2),
        admin_starting_balance: Decimal::new(100_000, 2),
        demo_fallback: false,
        cookie_secure: false,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_expiry_days: 7,
        },
        provider: ProviderConfig {
            base_url: "http://provider.invalid".to_string(),
            api_secret: "test-provider-secret".to_string(),
            service_id: 21,
            service_name: "Yemeksepeti".to_string(),
            timeout_secs: 5,
        },
    }
}

/// Full router with the default stub gateway.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(StubGateway::default()), test_config())
}

/// Full router with an explicit gateway and config.
pub fn build_test_app_with(
    pool: PgPool,
    gateway: Arc<dyn SmsGateway>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gateway,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user directly in the database and return the row plus the
/// plaintext password used.
pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    balance: Decimal,
    admin: bool,
) -> (User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hashed,
        name: None,
        balance,
        is_admin: admin,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in via the API and return the response body plus the auth cookie.
pub async fn login(app: Router, email: &str, password: &str) -> (serde_json::Value, String) {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = auth_cookie(&response);
    (body_json(response).await, cookie)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, "GET", uri, None, Some(cookie)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, Some(body), None).await
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, "POST", uri, Some(body), Some(cookie)).await
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    };

    app.oneshot(request).await.expect("infallible service")
}

/// Parse a JSON response body.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Extract the `auth_token=...` pair from a `Set-Cookie` response header.
pub fn auth_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("response must set the auth cookie")
        .to_str()
        .expect("cookie must be ASCII");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair present")
        .to_string()
}

/// Parse a serialized decimal out of a JSON field.
pub fn decimal_field(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .expect("decimal fields serialize as strings")
        .parse()
        .expect("valid decimal")
}
