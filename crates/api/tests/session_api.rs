//! HTTP-level integration tests for the public session read path and the
//! degraded-mode fallback.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, StubGateway};
use sqlx::PgPool;

/// Session details come back normalized: formatted number, defaulted
/// country/platform, expiry in the future.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_session_normalized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/session/482117").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["degraded"], false);
    assert_eq!(json["session"]["id"], "482117");
    assert_eq!(json["session"]["display_number"], "+90 555 123 4567");
    assert_eq!(json["session"]["country"]["name"], "Turkey");
    assert_eq!(json["session"]["platform"]["name"], "Yemeksepeti");
}

/// The poll route extracts verification codes and stamps the fetch time.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_messages_extracts_code(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/messages/482117").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["degraded"], false);
    assert!(json["fetched_at"].is_string(), "poll responses are stamped");

    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender"], "INSTAGRAM");
    assert_eq!(messages[0]["code"], "142323");
}

/// With the fallback off (the default), an upstream failure is a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upstream_failure_without_fallback(pool: PgPool) {
    let gateway = Arc::new(StubGateway {
        fail_all: true,
        ..StubGateway::default()
    });
    let app = common::build_test_app_with(pool, gateway, common::test_config());

    let response = get(app, "/api/v1/session/482117").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "UPSTREAM_ERROR");
}

/// With the fallback on, the read routes serve demo data flagged degraded.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upstream_failure_with_demo_fallback(pool: PgPool) {
    let gateway = Arc::new(StubGateway {
        fail_all: true,
        ..StubGateway::default()
    });
    let mut config = common::test_config();
    config.demo_fallback = true;
    let app = common::build_test_app_with(pool, gateway, config);

    let response = get(app.clone(), "/api/v1/session/482117").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["degraded"], true, "demo data must be flagged");
    assert_eq!(json["session"]["id"], "482117");

    let response = get(app, "/api/v1/messages/482117").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["degraded"], true);
    assert_eq!(json["messages"][0]["code"], "142323");
}

/// Degraded mode never touches the billing path: a funded rent against a
/// dead provider still fails even with the fallback on.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_demo_fallback_never_applies_to_rent(pool: PgPool) {
    let (_user, password) =
        common::create_test_user(&pool, "billing@test.com", rust_decimal::Decimal::new(2500, 2), false)
            .await;

    let gateway = Arc::new(StubGateway {
        fail_all: true,
        ..StubGateway::default()
    });
    let mut config = common::test_config();
    config.demo_fallback = true;
    let app = common::build_test_app_with(pool, gateway, config);

    let (_login, cookie) = common::login(app.clone(), "billing@test.com", &password).await;
    let response =
        common::post_json_with_cookie(app.clone(), "/api/v1/rent", serde_json::json!({}), &cookie)
            .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // And nothing was debited for fabricated data.
    let response = common::get_with_cookie(app, "/api/v1/user/balance", &cookie).await;
    assert_eq!(
        common::decimal_field(&body_json(response).await["balance"]),
        rust_decimal::Decimal::new(2500, 2)
    );
}

/// Catalog pass-through.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_catalog_countries(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/catalog/countries").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["countries"][0]["name"], "Turkey");
    assert_eq!(json["countries"][0]["isoCode"], "TR");
}
