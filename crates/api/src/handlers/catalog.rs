//! Handlers for catalog browsing: countries and rentable number offers.
//!
//! Pure pass-through of the provider's catalog shapes; no local state is
//! involved.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/catalog/countries
pub async fn countries(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let countries = state.gateway.list_countries().await?;
    Ok(Json(json!({ "countries": countries })))
}

/// GET /api/v1/catalog/numbers
///
/// Offers for the fixed service this deployment rents.
pub async fn numbers(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let numbers = state
        .gateway
        .list_numbers(state.config.provider.service_id)
        .await?;
    Ok(Json(json!({ "numbers": numbers })))
}
