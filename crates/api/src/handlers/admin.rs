//! Handlers for the `/admin` resource.
//!
//! Every route requires the admin flag via [`RequireAdmin`]; authorization
//! lives in the extractor, not in the handler bodies.

use axum::extract::{Path, State};
use axum::Json;
use numrent_core::error::CoreError;
use numrent_core::types::DbId;
use numrent_db::models::user::UserResponse;
use numrent_db::repositories::UserRepo;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::handlers::user::AmountRequest;
use crate::middleware::auth::RequireAdmin;
use crate::services::admin_sessions;
use crate::state::AppState;

/// GET /api/v1/admin/users
///
/// All user records in safe form (no password hashes).
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<serde_json::Value>> {
    let users: Vec<UserResponse> = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(json!({ "users": users })))
}

/// GET /api/v1/admin/sessions
///
/// Every user's sessions resolved against the provider and flattened, each
/// stamped with its owner. Individual lookup failures are skipped.
pub async fn list_sessions(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<serde_json::Value>> {
    let sessions = admin_sessions::list_all_sessions(&state).await?;
    Ok(Json(json!({ "sessions": sessions })))
}

/// POST /api/v1/admin/users/{id}/balance
///
/// Credit or debit the target user. The floor contract is the same as for
/// self-service mutations.
pub async fn adjust_user_balance(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<String>,
    Json(input): Json<AmountRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user_id = parse_user_id(&user_id)?;

    let amount = input
        .amount
        .ok_or_else(|| CoreError::Validation("A valid amount is required".to_string()))?;

    match UserRepo::adjust_balance(&state.pool, user_id, amount).await? {
        Some(balance) => {
            tracing::info!(
                admin_id = admin.user_id,
                target_id = user_id,
                %amount,
                "admin balance adjustment"
            );
            Ok(Json(json!({ "success": true, "balance": balance })))
        }
        None => {
            let available = UserRepo::balance(&state.pool, user_id)
                .await?
                .ok_or_else(|| target_not_found(user_id))?;
            Err(CoreError::InsufficientFunds {
                required: amount.abs(),
                available,
            }
            .into())
        }
    }
}

/// POST /api/v1/admin/users/{id}/make-admin
///
/// One-way promotion. Promoting an existing admin is a no-op success; there
/// is no demotion route.
pub async fn make_admin(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let user_id = parse_user_id(&user_id)?;

    let promoted = UserRepo::promote_to_admin(&state.pool, user_id).await?;
    if !promoted && UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(target_not_found(user_id));
    }

    tracing::info!(admin_id = admin.user_id, target_id = user_id, "admin promotion");
    Ok(Json(json!({ "success": true })))
}

/// A malformed id in the path is treated as not-found, never a crash or a
/// type-level rejection.
fn parse_user_id(raw: &str) -> Result<DbId, AppError> {
    raw.parse().map_err(|_| {
        AppError::Core(CoreError::NotFound {
            entity: "user",
            id: raw.to_string(),
        })
    })
}

fn target_not_found(user_id: DbId) -> AppError {
    CoreError::NotFound {
        entity: "user",
        id: user_id.to_string(),
    }
    .into()
}
