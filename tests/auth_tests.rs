mod common;

use axum::http::{Method, StatusCode};
use common::{login, send, spawn_app};

#[tokio::test]
async fn test_login_success_returns_token_and_user() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/auth/login",
        None,
        Some(serde_json::json!({
            "email": "admin@loja.com",
            "password": "admin123",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["user"]["email"], "admin@loja.com");
    assert!(body["data"]["user"]["id"].is_i64());
}

#[tokio::test]
async fn test_login_accepts_email_casing_and_whitespace_variants() {
    let app = spawn_app().await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/auth/login",
        None,
        Some(serde_json::json!({
            "email": "  Admin@Loja.COM ",
            "password": "admin123",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/auth/login",
        None,
        Some(serde_json::json!({
            "email": "admin@loja.com",
            "password": "senha-errada",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email ou senha inválidos");
}

#[tokio::test]
async fn test_login_unknown_email_is_unauthorized() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/auth/login",
        None,
        Some(serde_json::json!({
            "email": "ninguem@loja.com",
            "password": "admin123",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Email ou senha inválidos");
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/auth/login",
        None,
        Some(serde_json::json!({
            "email": "nao-e-um-email",
            "password": "admin123",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_rejects_short_password() {
    let app = spawn_app().await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/auth/login",
        None,
        Some(serde_json::json!({
            "email": "admin@loja.com",
            "password": "12345",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_a_token() {
    let app = spawn_app().await;

    for uri in [
        "/clients",
        "/clients/1",
        "/sales",
        "/sales/stats",
        "/sales/top-clients",
    ] {
        let (status, body) = send(&app.router, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "GET {} without token", uri);
        assert_eq!(body["success"], false);
        // No entity data may escape the gate.
        assert!(body.get("data").is_none(), "GET {} leaked data", uri);
    }
}

#[tokio::test]
async fn test_garbage_token_is_forbidden() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app.router,
        Method::GET,
        "/sales",
        Some("nao.e.token"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Token inválido");
}

#[tokio::test]
async fn test_tampered_token_is_forbidden() {
    let app = spawn_app().await;
    let token = login(&app.router).await;

    let mut tampered = token.clone();
    tampered.pop();

    let (status, _) = send(&app.router, Method::GET, "/sales", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_issued_token_opens_the_gate() {
    let app = spawn_app().await;
    let token = login(&app.router).await;

    let (status, body) = send(&app.router, Method::GET, "/sales", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app().await;

    let (status, body) = send(&app.router, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"], "Connected");
    assert_eq!(body["clientsCount"], 0);
    assert!(body["uptime"].is_number());
}
