//! Handlers for the `/auth` resource (register, login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::Json;
use numrent_core::error::CoreError;
use numrent_db::models::user::{CreateUser, User};
use numrent_db::repositories::UserRepo;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::auth::cookie::{build_auth_cookie, clear_auth_cookie};
use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register` (and the admin variant).
///
/// Fields are `Option` so presence can be validated to a 400 rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Request body for `POST /auth/login` (and the admin variant).
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a user account with a zero starting balance.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user = create_account(&state, input, false).await?;

    Ok(Json(json!({
        "message": "User created successfully",
        "user": { "id": user.id, "email": user.email, "name": user.name },
    })))
}

/// POST /api/v1/auth/admin/register
///
/// Create an admin account with the configured elevated starting balance.
/// Deliberately ungated, like the original bootstrap endpoint: the first
/// admin has to come from somewhere.
pub async fn admin_register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user = create_account(&state, input, true).await?;

    Ok(Json(json!({
        "message": "Admin user created successfully",
        "user": { "id": user.id, "email": user.email, "name": user.name },
    })))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Sets the identity cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let user = authenticate(&state, &input).await?;
    login_response(&state, &user, "Login successful")
}

/// POST /api/v1/auth/admin/login
///
/// As login, but rejects non-admin accounts with 403.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let user = authenticate(&state, &input).await?;

    if !user.is_admin {
        return Err(CoreError::Forbidden("Admin privileges required".into()).into());
    }

    login_response(&state, &user, "Admin login successful")
}

/// POST /api/v1/auth/logout
///
/// Clears the identity cookie. Stateless tokens mean there is nothing to
/// revoke server-side.
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        AppendHeaders([(SET_COOKIE, clear_auth_cookie(state.config.cookie_secure))]),
        Json(json!({ "message": "Logged out successfully" })),
    )
        .into_response()
}

/// GET /api/v1/auth/me
///
/// Who-am-I query. Any token problem fails open to `{"user": null}` with a
/// 401 and a cookie clear, so a stale cookie heals itself on the next page
/// load.
pub async fn me(State(state): State<AppState>, MaybeUser(current): MaybeUser) -> AppResult<Response> {
    let Some(current) = current else {
        return Ok(anonymous_response(&state));
    };

    // The token verified; load the fresh record, since balance and the admin
    // flag change between requests.
    let Some(user) = UserRepo::find_by_id(&state.pool, current.user_id).await? else {
        return Ok(anonymous_response(&state));
    };

    Ok(Json(json!({
        "user": {
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "balance": user.balance,
            "is_admin": user.is_admin,
        },
    }))
    .into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate credentials, check for an existing account, hash, and insert.
async fn create_account(
    state: &AppState,
    input: RegisterRequest,
    admin: bool,
) -> AppResult<User> {
    let (email, password) = require_credentials(&input.email, &input.password)?;

    // Pre-check for a clean conflict message; `uq_users_email` is the
    // backstop against a racing insert.
    if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
        return Err(CoreError::Conflict("User already exists".into()).into());
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let balance = if admin {
        state.config.admin_starting_balance
    } else {
        Decimal::ZERO
    };

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: email.to_string(),
            password_hash,
            name: input.name,
            balance,
            is_admin: admin,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, admin, "account created");
    Ok(user)
}

/// Resolve the user and verify the password. Unknown email and wrong
/// password produce the same 401 message.
async fn authenticate(state: &AppState, input: &LoginRequest) -> AppResult<User> {
    let (email, password) = require_credentials(&input.email, &input.password)?;

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !valid {
        return Err(CoreError::Unauthorized("Invalid credentials".into()).into());
    }

    Ok(user)
}

/// Issue a token, set the cookie, and build the login body.
fn login_response(state: &AppState, user: &User, message: &str) -> AppResult<Response> {
    let token = issue_token(user.id, &user.email, user.is_admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = build_auth_cookie(
        &token,
        state.config.jwt.expiry_secs(),
        state.config.cookie_secure,
    );

    let body = json!({
        "message": message,
        "user": {
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "balance": user.balance,
            "is_admin": user.is_admin,
        },
    });

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(body)).into_response())
}

/// 401 `{"user": null}` with a cookie clear.
fn anonymous_response(state: &AppState) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        AppendHeaders([(SET_COOKIE, clear_auth_cookie(state.config.cookie_secure))]),
        Json(json!({ "user": null })),
    )
        .into_response()
}

/// Presence check shared by register and login.
fn require_credentials<'a>(
    email: &'a Option<String>,
    password: &'a Option<String>,
) -> Result<(&'a str, &'a str), AppError> {
    match (email.as_deref().map(str::trim), password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(CoreError::Validation("Email and password are required".into()).into()),
    }
}
