//! Shared harness for the integration tests: a per-test in-memory store and
//! a router-level request helper, so no external service is required.

// Not every test crate uses every helper.
#![allow(dead_code)]

use std::str::FromStr;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use loja_backend::{AppState, Config, DbPool, create_router, database};

pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
}

/// Builds a fully wired application over a fresh in-memory database with
/// the admin user seeded and demo data disabled.
pub async fn spawn_app() -> TestApp {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    // One long-lived connection keeps the in-memory database alive for the
    // whole test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");

    database::run_migrations(&pool)
        .await
        .expect("migrations failed");

    let mut config = Config::default();
    config.seed.demo_data = false;
    database::seed(&pool, &config).await.expect("seed failed");

    let state = AppState::new(pool.clone(), config);

    TestApp {
        router: create_router(state),
        pool,
    }
}

/// Sends one request through the router and returns status plus parsed body.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("failed to build request"),
        None => builder.body(Body::empty()).expect("failed to build request"),
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response was not JSON")
    };

    (status, json)
}

/// Logs in as the seeded admin and returns the bearer token.
pub async fn login(router: &Router) -> String {
    let (status, body) = send(
        router,
        Method::POST,
        "/auth/login",
        None,
        Some(serde_json::json!({
            "email": "admin@loja.com",
            "password": "admin123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "admin login should succeed: {}", body);

    body["data"]["token"]
        .as_str()
        .expect("login response should carry a token")
        .to_string()
}

/// Creates a client through the API and returns its generated id (looked up
/// by email, since the creation envelope intentionally omits the id).
pub async fn create_client(app: &TestApp, token: &str, nome: &str, email: &str) -> i64 {
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/clients",
        Some(token),
        Some(serde_json::json!({
            "nome": nome,
            "email": email,
            "dataNascimento": "1990-01-01",
        })),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "client creation should succeed: {}",
        body
    );

    sqlx::query_scalar::<_, i64>("SELECT id FROM clients WHERE email = ?")
        .bind(email.trim().to_lowercase())
        .fetch_one(&app.pool)
        .await
        .expect("created client should be in the store")
}

/// Registers a sale through the API.
pub async fn create_sale(app: &TestApp, token: &str, client_id: i64, valor: f64, data: &str) {
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/sales",
        Some(token),
        Some(serde_json::json!({
            "clientId": client_id,
            "valor": valor,
            "data": data,
        })),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "sale creation should succeed: {}",
        body
    );
}
