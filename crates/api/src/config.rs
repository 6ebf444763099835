use rust_decimal::Decimal;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Price debited per rental (default: `25.00`).
    pub rental_price: Decimal,
    /// Starting balance for admin-created accounts (default: `1000.00`).
    pub admin_starting_balance: Decimal,
    /// When true, the read-only session/message routes substitute clearly
    /// flagged demonstration data if the provider is unreachable. Never
    /// applies to the rental/billing path.
    pub demo_fallback: bool,
    /// Mark the auth cookie `Secure`. Off for local development.
    pub cookie_secure: bool,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Remote SMS-provider configuration.
    pub provider: ProviderConfig,
}

/// Connection settings for the remote SMS-rental provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider API.
    pub base_url: String,
    /// Bearer secret. Must never appear in logs or client responses.
    pub api_secret: String,
    /// The fixed service all rentals target.
    pub service_id: i64,
    /// Display name used when the provider omits the platform descriptor.
    pub service_name: String,
    /// Client-side timeout for provider requests in seconds (default: `15`).
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Required | Default                    |
    /// |--------------------------|----------|----------------------------|
    /// | `HOST`                   | no       | `0.0.0.0`                  |
    /// | `PORT`                   | no       | `3000`                     |
    /// | `CORS_ORIGINS`           | no       | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | no       | `30`                       |
    /// | `RENTAL_PRICE`           | no       | `25.00`                    |
    /// | `ADMIN_STARTING_BALANCE` | no       | `1000.00`                  |
    /// | `DEMO_FALLBACK`          | no       | `false`                    |
    /// | `COOKIE_SECURE`          | no       | `false`                    |
    /// | `JWT_SECRET`             | **yes**  | --                         |
    /// | `TOKEN_EXPIRY_DAYS`      | no       | `7`                        |
    /// | `PROVIDER_BASE_URL`      | no       | `https://api.verifynow.net`|
    /// | `PROVIDER_API_SECRET`    | **yes**  | --                         |
    /// | `PROVIDER_SERVICE_ID`    | no       | `21`                       |
    /// | `PROVIDER_SERVICE_NAME`  | no       | `Yemeksepeti`              |
    /// | `PROVIDER_TIMEOUT_SECS`  | no       | `15`                       |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or any value fails to parse.
    /// Misconfiguration should stop the server at startup, not at the first
    /// request.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let rental_price: Decimal = std::env::var("RENTAL_PRICE")
            .unwrap_or_else(|_| "25.00".into())
            .parse()
            .expect("RENTAL_PRICE must be a valid decimal");

        let admin_starting_balance: Decimal = std::env::var("ADMIN_STARTING_BALANCE")
            .unwrap_or_else(|_| "1000.00".into())
            .parse()
            .expect("ADMIN_STARTING_BALANCE must be a valid decimal");

        let demo_fallback = std::env::var("DEMO_FALLBACK")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let jwt = JwtConfig::from_env();
        let provider = ProviderConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            rental_price,
            admin_starting_balance,
            demo_fallback,
            cookie_secure,
            jwt,
            provider,
        }
    }
}

impl ProviderConfig {
    /// Load provider settings from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `PROVIDER_API_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let base_url = std::env::var("PROVIDER_BASE_URL")
            .unwrap_or_else(|_| "https://api.verifynow.net".into());

        let api_secret = std::env::var("PROVIDER_API_SECRET")
            .expect("PROVIDER_API_SECRET must be set in the environment");
        assert!(!api_secret.is_empty(), "PROVIDER_API_SECRET must not be empty");

        let service_id: i64 = std::env::var("PROVIDER_SERVICE_ID")
            .unwrap_or_else(|_| "21".into())
            .parse()
            .expect("PROVIDER_SERVICE_ID must be a valid i64");

        let service_name =
            std::env::var("PROVIDER_SERVICE_NAME").unwrap_or_else(|_| "Yemeksepeti".into());

        let timeout_secs: u64 = std::env::var("PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("PROVIDER_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_secret,
            service_id,
            service_name,
            timeout_secs,
        }
    }
}
