//! End-to-end HTTP flows against the in-memory backend

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use key_ledger::api::create_router;
use key_ledger::infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};
use key_ledger::AppConfig;

const ADMIN_ID: &str = "admin-1";

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-secret".to_string();
    config.auth.bootstrap_admin_id = Some(ADMIN_ID.to_string());
    config.auth.bootstrap_admin_email = Some("admin@example.com".to_string());
    config
}

async fn test_app() -> (Router, AppConfig) {
    let config = test_config();
    let state = key_ledger::create_app_state_with_config(&config)
        .await
        .unwrap();

    (create_router(state), config)
}

fn token_for(config: &AppConfig, sub: &str) -> String {
    JwtService::new(JwtConfig::from(&config.auth))
        .generate(sub, &format!("{}@example.com", sub))
        .unwrap()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

async fn registered_user(app: &Router, config: &AppConfig, sub: &str) -> String {
    let token = token_for(config, sub);
    let (status, _) = send(app, "POST", "/auth/register", Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    token
}

async fn issue_key(app: &Router, token: &str) -> String {
    let (status, body) = send(app, "POST", "/v1/api-keys", Some(token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["api_key"]["key"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_key_lifecycle() {
    let (app, config) = test_app().await;
    let user = registered_user(&app, &config, "user-1").await;
    let admin = token_for(&config, ADMIN_ID);

    let k1 = issue_key(&app, &user).await;
    let k2 = issue_key(&app, &user).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/admin/accounts/user-1/api-keys/{}/balance", k1),
        Some(&admin),
        Some(json!({ "balance": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_balance"], 100);

    let (status, body) = send(
        &app,
        "POST",
        "/v1/api-keys/transfer",
        Some(&user),
        Some(json!({ "from": k1, "to": k2, "amount": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_keys"][0]["balance"], 70);
    assert_eq!(body["api_keys"][1]["balance"], 30);
    assert_eq!(body["total_balance"], 100);

    for absent in ["tk_neverissued", "no.such.key"] {
        let (status, body) = send(
            &app,
            "DELETE",
            &format!("/v1/api-keys/{}", absent),
            Some(&user),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", absent);
        assert_eq!(body["api_keys"].as_array().unwrap().len(), 2);
        assert_eq!(body["api_keys"][0]["balance"], 70);
        assert_eq!(body["api_keys"][1]["balance"], 30);
    }

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/v1/api-keys/{}", k1),
        Some(&user),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_keys"].as_array().unwrap().len(), 1);
    assert_eq!(body["total_balance"], 30);

    let (status, body) = send(&app, "GET", "/v1/account", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_keys"][0]["key"], k2.as_str());
    assert_eq!(body["api_keys"][0]["balance"], 30);
}

#[tokio::test]
async fn test_transfer_failures_leave_balances_untouched() {
    let (app, config) = test_app().await;
    let user = registered_user(&app, &config, "user-2").await;
    let admin = token_for(&config, ADMIN_ID);

    let k1 = issue_key(&app, &user).await;
    let k2 = issue_key(&app, &user).await;
    send(
        &app,
        "PUT",
        &format!("/admin/accounts/user-2/api-keys/{}/balance", k1),
        Some(&admin),
        Some(json!({ "balance": 10 })),
    )
    .await;

    let cases = [
        (json!({ "from": k1, "to": k2, "amount": 11 }), StatusCode::CONFLICT, "insufficient_balance"),
        (json!({ "from": k1, "to": k2, "amount": 0 }), StatusCode::BAD_REQUEST, "invalid_amount"),
        (json!({ "from": k1, "to": k2, "amount": 1.5 }), StatusCode::BAD_REQUEST, "invalid_amount"),
        (json!({ "from": k1, "to": k1, "amount": 1 }), StatusCode::BAD_REQUEST, "same_key"),
        (json!({ "from": k1, "to": "tk_missing", "amount": 1 }), StatusCode::NOT_FOUND, "key_not_found"),
    ];

    for (request, expected_status, expected_code) in cases {
        let (status, body) =
            send(&app, "POST", "/v1/api-keys/transfer", Some(&user), Some(request)).await;
        assert_eq!(status, expected_status);
        assert_eq!(error_code(&body), expected_code);
    }

    let (_, body) = send(&app, "GET", "/v1/account", Some(&user), None).await;
    assert_eq!(body["api_keys"][0]["balance"], 10);
    assert_eq!(body["api_keys"][1]["balance"], 0);
}

#[tokio::test]
async fn test_key_capacity() {
    let (app, config) = test_app().await;
    let user = registered_user(&app, &config, "user-3").await;

    for _ in 0..10 {
        issue_key(&app, &user).await;
    }

    let (status, body) = send(&app, "POST", "/v1/api-keys", Some(&user), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "capacity_exceeded");
}

#[tokio::test]
async fn test_authentication_and_authorization() {
    let (app, config) = test_app().await;

    let (status, _) = send(&app, "GET", "/v1/account", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/v1/account", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let stranger = token_for(&config, "stranger");
    let (status, body) = send(&app, "GET", "/v1/account", Some(&stranger), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "account_not_registered");

    let user = registered_user(&app, &config, "user-4").await;
    let (status, body) = send(&app, "GET", "/admin/accounts", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "admin_required");

    let (status, _) = send(&app, "POST", "/auth/register", Some(&user), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let admin = token_for(&config, ADMIN_ID);
    let (status, body) = send(&app, "GET", "/admin/accounts", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_admin_account_management() {
    let (app, config) = test_app().await;
    let user = registered_user(&app, &config, "user-5").await;
    let admin = token_for(&config, ADMIN_ID);

    let (status, body) = send(&app, "GET", "/admin/accounts/user-5", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "user-5@example.com");

    let key = issue_key(&app, &user).await;
    let balance_uri = format!("/admin/accounts/user-5/api-keys/{}/balance", key);

    let (status, body) = send(
        &app,
        "PUT",
        &balance_uri,
        Some(&admin),
        Some(json!({ "balance": 25 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_keys"][0]["balance"], 25);

    for rejected in [json!(-1), json!(2.5), json!("25")] {
        let (status, body) = send(
            &app,
            "PUT",
            &balance_uri,
            Some(&admin),
            Some(json!({ "balance": rejected })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "invalid_amount");
    }

    let (_, body) = send(&app, "GET", "/admin/accounts/user-5", Some(&admin), None).await;
    assert_eq!(body["api_keys"][0]["balance"], 25);

    let (status, body) = send(
        &app,
        "PUT",
        &balance_uri,
        Some(&admin),
        Some(json!({ "balance": u64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_keys"][0]["balance"], u64::MAX);

    let (status, body) = send(
        &app,
        "PUT",
        "/admin/accounts/user-5/api-keys/tk_missing/balance",
        Some(&admin),
        Some(json!({ "balance": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "key_not_found");

    let (status, _) = send(&app, "DELETE", "/admin/accounts/user-5", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", "/admin/accounts/user-5", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blog_posts() {
    let (app, config) = test_app().await;
    let admin = token_for(&config, ADMIN_ID);

    let (status, body) = send(
        &app,
        "POST",
        "/admin/posts",
        Some(&admin),
        Some(json!({
            "title": "Launch",
            "description": "We are live",
            "url": "https://example.com/launch"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let post_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/admin/posts",
        Some(&admin),
        Some(json!({ "title": "", "url": "not a url" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "validation_error");

    let (status, body) = send(&app, "GET", "/v1/posts", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["posts"][0]["title"], "Launch");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/admin/posts/{}", post_id),
        Some(&admin),
        Some(json!({ "title": "Launched" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Launched");
    assert_eq!(body["url"], "https://example.com/launch");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/posts/{}", post_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/v1/posts", None, None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _) = test_app().await;

    for path in ["/health", "/ready"] {
        let (status, body) = send(&app, "GET", path, None, None).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(body["status"], "healthy");
    }

    let (status, _) = send(&app, "GET", "/live", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
