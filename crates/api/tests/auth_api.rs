//! HTTP-level integration tests for registration, login, logout, and the
//! who-am-I route.

mod common;

use axum::http::StatusCode;
use common::{body_json, decimal_field, get, get_with_cookie, post_json};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns the public user shape, no hash.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "email": "new@test.com", "password": "hunter2hunter2", "name": "Yeni" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "new@test.com");
    assert_eq!(json["user"]["name"], "Yeni");
    assert!(json["user"]["id"].is_number());
    assert!(json["user"].get("password_hash").is_none());
}

/// Missing fields are a 400, not a deserialization error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_missing_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        json!({ "email": "no-password@test.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(app, "/api/v1/auth/register", json!({ "password": "x" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The same email twice conflicts, regardless of password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = post_json(
        app.clone(),
        "/api/v1/auth/register",
        json!({ "email": "dup@test.com", "password": "first-password" }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "email": "dup@test.com", "password": "different-password" }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

/// Admin registration starts with the elevated balance and the admin flag.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_register_elevated_balance(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/admin/register",
        json!({ "email": "boss@test.com", "password": "admin-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (json, _cookie) = common::login(app, "boss@test.com", "admin-password").await;
    assert_eq!(json["user"]["is_admin"], true);
    assert_eq!(
        decimal_field(&json["user"]["balance"]),
        Decimal::new(100_000, 2)
    );
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

/// Successful login sets an HttpOnly cookie and returns the user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success_sets_cookie(pool: PgPool) {
    let (user, password) = common::create_test_user(&pool, "login@test.com", Decimal::ZERO, false).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "login@test.com", "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("login must set the auth cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("auth_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "login@test.com");
    assert_eq!(json["user"]["is_admin"], false);
    assert_eq!(decimal_field(&json["user"]["balance"]), Decimal::ZERO);
}

/// Wrong password and unknown email produce the same 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_bad_credentials(pool: PgPool) {
    common::create_test_user(&pool, "victim@test.com", Decimal::ZERO, false).await;
    let app = common::build_test_app(pool);

    let wrong_password = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "victim@test.com", "password": "incorrect" }),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "ghost@test.com", "password": "whatever" }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
}

/// The admin login variant rejects non-admin accounts with 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_login_rejects_regular_user(pool: PgPool) {
    let (_user, password) =
        common::create_test_user(&pool, "pleb@test.com", Decimal::ZERO, false).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/admin/login",
        json!({ "email": "pleb@test.com", "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Logout clears the cookie with Max-Age=0.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_clears_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/logout", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("logout must clear the cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("auth_token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

// ---------------------------------------------------------------------------
// Who-am-I
// ---------------------------------------------------------------------------

/// /auth/me with a valid cookie returns the fresh user record.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_with_valid_cookie(pool: PgPool) {
    let (user, password) =
        common::create_test_user(&pool, "me@test.com", Decimal::new(4200, 2), false).await;
    let app = common::build_test_app(pool);

    let (_login, cookie) = common::login(app.clone(), "me@test.com", &password).await;

    let response = get_with_cookie(app, "/api/v1/auth/me", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(decimal_field(&json["user"]["balance"]), Decimal::new(4200, 2));
}

/// /auth/me without a cookie fails open to `{"user": null}` with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_anonymous(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert!(json["user"].is_null());
}

/// A garbage token is treated exactly like no token, and the bad cookie is
/// cleared in the response.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_with_garbage_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response =
        get_with_cookie(app, "/api/v1/auth/me", "auth_token=not.a.real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("bad cookie must be cleared")
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("Max-Age=0"));

    let json = body_json(response).await;
    assert!(json["user"].is_null());
}
