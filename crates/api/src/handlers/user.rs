//! Handlers for the `/user` resource: balance, session directory, profile.
//!
//! All routes here require authentication; there is no fail-open variant.

use axum::extract::State;
use axum::Json;
use numrent_core::error::CoreError;
use numrent_core::types::DbId;
use numrent_db::repositories::UserRepo;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for the balance mutation routes.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Option<Decimal>,
}

/// Request body for `POST /user/sessions`.
#[derive(Debug, Deserialize)]
pub struct AddSessionRequest {
    pub session_id: Option<String>,
}

/// Request body for `POST /user/profile`. Name only -- email is immutable.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Balance ledger
// ---------------------------------------------------------------------------

/// GET /api/v1/user/balance
pub async fn get_balance(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<serde_json::Value>> {
    let balance = UserRepo::balance(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| not_found(user.user_id))?;

    Ok(Json(json!({ "balance": balance })))
}

/// POST /api/v1/user/balance
///
/// Apply a signed delta (top-up or correction). A delta that would cross
/// zero is rejected and leaves the balance unchanged.
pub async fn update_balance(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<AmountRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let amount = input
        .amount
        .ok_or_else(|| CoreError::Validation("A valid amount is required".to_string()))?;

    apply_delta(&state, user.user_id, amount).await
}

/// POST /api/v1/user/balance/deduct
///
/// Debit a positive amount. Same floor contract as the generic delta; the
/// route exists for the rental flow's explicit spend intent.
pub async fn deduct_balance(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<AmountRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let amount = input
        .amount
        .filter(|a| *a > Decimal::ZERO)
        .ok_or_else(|| CoreError::Validation("A positive amount is required".to_string()))?;

    apply_delta(&state, user.user_id, -amount).await
}

/// Run the conditional ledger update and disambiguate a `None`.
async fn apply_delta(
    state: &AppState,
    user_id: DbId,
    delta: Decimal,
) -> AppResult<Json<serde_json::Value>> {
    match UserRepo::adjust_balance(&state.pool, user_id, delta).await? {
        Some(balance) => Ok(Json(json!({ "success": true, "balance": balance }))),
        None => {
            // No row matched: unknown user, or the floor refused the debit.
            let available = UserRepo::balance(&state.pool, user_id)
                .await?
                .ok_or_else(|| not_found(user_id))?;
            Err(CoreError::InsufficientFunds {
                required: delta.abs(),
                available,
            }
            .into())
        }
    }
}

// ---------------------------------------------------------------------------
// Session directory
// ---------------------------------------------------------------------------

/// GET /api/v1/user/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<serde_json::Value>> {
    let sessions = UserRepo::session_ids(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| not_found(user.user_id))?;

    Ok(Json(json!({ "sessions": sessions })))
}

/// POST /api/v1/user/sessions
///
/// Idempotent: adding an id the user already owns is a no-op success.
pub async fn add_session(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<AddSessionRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let session_id = input
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation("Session ID is required".to_string()))?;

    if UserRepo::find_by_id(&state.pool, user.user_id).await?.is_none() {
        return Err(not_found(user.user_id));
    }

    let added = UserRepo::add_session(&state.pool, user.user_id, session_id).await?;

    Ok(Json(json!({ "success": true, "added": added })))
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// POST /api/v1/user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<ProfileRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let updated = UserRepo::update_name(&state.pool, user.user_id, input.name.as_deref()).await?;
    if !updated {
        return Err(not_found(user.user_id));
    }

    Ok(Json(json!({ "success": true })))
}

fn not_found(user_id: DbId) -> AppError {
    CoreError::NotFound {
        entity: "user",
        id: user_id.to_string(),
    }
    .into()
}
