mod common;

use axum::http::{Method, StatusCode};
use common::{create_client, create_sale, login, send, spawn_app};

#[tokio::test]
async fn test_create_sale_returns_persisted_row() {
    let app = spawn_app().await;
    let token = login(&app.router).await;
    let id = create_client(&app, &token, "Ana", "ana@example.com").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/sales",
        Some(&token),
        Some(serde_json::json!({
            "clientId": id,
            "valor": 150.5,
            "data": "2024-01-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Venda registrada com sucesso");
    assert_eq!(body["data"]["clientId"], id);
    assert_eq!(body["data"]["valor"], 150.5);
    assert_eq!(body["data"]["data"], "2024-01-01");
    assert!(body["data"]["id"].is_i64());
}

#[tokio::test]
async fn test_create_sale_rejects_unknown_client() {
    let app = spawn_app().await;
    let token = login(&app.router).await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/sales",
        Some(&token),
        Some(serde_json::json!({
            "clientId": 9999,
            "valor": 10.0,
            "data": "2024-01-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_create_sale_rejects_invalid_input() {
    let app = spawn_app().await;
    let token = login(&app.router).await;
    let id = create_client(&app, &token, "Ana", "ana@example.com").await;

    // Negative value
    let (status, _) = send(
        &app.router,
        Method::POST,
        "/sales",
        Some(&token),
        Some(serde_json::json!({ "clientId": id, "valor": -1.0, "data": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Not a calendar date
    let (status, _) = send(
        &app.router,
        Method::POST,
        "/sales",
        Some(&token),
        Some(serde_json::json!({ "clientId": id, "valor": 1.0, "data": "01/01/2024" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing client id
    let (status, _) = send(
        &app.router,
        Method::POST,
        "/sales",
        Some(&token),
        Some(serde_json::json!({ "valor": 1.0, "data": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_sales_orders_by_date_descending() {
    let app = spawn_app().await;
    let token = login(&app.router).await;
    let id = create_client(&app, &token, "Ana", "ana@example.com").await;
    create_sale(&app, &token, id, 10.0, "2024-01-02").await;
    create_sale(&app, &token, id, 20.0, "2024-01-05").await;
    create_sale(&app, &token, id, 30.0, "2024-01-03").await;

    let (status, body) = send(&app.router, Method::GET, "/sales", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let datas: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|sale| sale["data"].as_str().unwrap())
        .collect();
    assert_eq!(datas, vec!["2024-01-05", "2024-01-03", "2024-01-02"]);
}

#[tokio::test]
async fn test_daily_stats_sums_per_day_most_recent_first() {
    let app = spawn_app().await;
    let token = login(&app.router).await;
    let ana = create_client(&app, &token, "Ana", "ana@example.com").await;
    let bruno = create_client(&app, &token, "Bruno", "bruno@example.com").await;
    create_sale(&app, &token, ana, 100.0, "2024-01-01").await;
    create_sale(&app, &token, bruno, 50.0, "2024-01-01").await;
    create_sale(&app, &token, ana, 25.0, "2024-01-02").await;

    let (status, body) = send(&app.router, Method::GET, "/sales/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"],
        serde_json::json!([
            { "data": "2024-01-02", "total": 25.0 },
            { "data": "2024-01-01", "total": 150.0 },
        ])
    );
}

#[tokio::test]
async fn test_daily_stats_empty_store_yields_empty_sequence() {
    let app = spawn_app().await;
    let token = login(&app.router).await;

    let (status, body) = send(&app.router, Method::GET, "/sales/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_top_clients_rankings_over_the_api() {
    let app = spawn_app().await;
    let token = login(&app.router).await;
    let a = create_client(&app, &token, "A", "a@example.com").await;
    let b = create_client(&app, &token, "B", "b@example.com").await;
    create_sale(&app, &token, a, 100.0, "2024-01-01").await;
    create_sale(&app, &token, a, 100.0, "2024-01-01").await;
    create_sale(&app, &token, b, 500.0, "2024-01-02").await;

    let (status, body) = send(
        &app.router,
        Method::GET,
        "/sales/top-clients",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    // volume: A=200 < B=500
    assert_eq!(data["maiorVolume"]["cliente"]["id"], b);
    assert_eq!(data["maiorVolume"]["totalVendas"], 500.0);
    // average: A=100 < B=500
    assert_eq!(data["maiorMedia"]["cliente"]["id"], b);
    assert_eq!(data["maiorMedia"]["mediaValor"], 500.0);
    // frequency: both have one distinct day; the tie goes to the lower id
    assert_eq!(data["maiorFrequencia"]["cliente"]["id"], a);
    assert_eq!(data["maiorFrequencia"]["diasUnicos"], 1);
}

#[tokio::test]
async fn test_top_clients_with_no_clients_returns_placeholder() {
    let app = spawn_app().await;
    let token = login(&app.router).await;

    let (status, body) = send(
        &app.router,
        Method::GET,
        "/sales/top-clients",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    for slot in ["maiorVolume", "maiorMedia", "maiorFrequencia"] {
        assert_eq!(data[slot]["cliente"]["id"], 0, "{} placeholder", slot);
        assert_eq!(data[slot]["cliente"]["nome"], "Nenhum cliente");
    }
    assert_eq!(data["maiorVolume"]["totalVendas"], 0.0);
    assert_eq!(data["maiorMedia"]["mediaValor"], 0.0);
    assert_eq!(data["maiorFrequencia"]["diasUnicos"], 0);
}

#[tokio::test]
async fn test_health_reports_client_count() {
    let app = spawn_app().await;
    let token = login(&app.router).await;
    create_client(&app, &token, "Ana", "ana@example.com").await;
    create_client(&app, &token, "Bruno", "bruno@example.com").await;

    let (status, body) = send(&app.router, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientsCount"], 2);
}
