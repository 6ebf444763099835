use std::sync::Arc;

use numrent_provider::SmsGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: numrent_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Remote SMS-provider gateway. Trait object so tests can stub it.
    pub gateway: Arc<dyn SmsGateway>,
}
