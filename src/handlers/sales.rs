//! Sale handlers: listing, registration and the two statistics endpoints.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};

use crate::{
    error::{Error, Result},
    middleware::auth::AuthenticatedUser,
    models::sales::{CreateSaleRequest, NewSale},
    queries,
    services::stats,
    state::AppState,
    validation::{validate_date, validate_valor},
};

/// GET /sales
///
/// Lists every sale, most recent sale date first.
///
/// # HTTP Status Codes
/// - `200 OK`: Sales retrieved successfully
/// - `401/403`: Missing or invalid token
pub async fn list_sales(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let sales = queries::sales::list(&mut conn).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": sales,
    })))
}

/// POST /sales
///
/// Registers a sale for an existing client. Sales are immutable once
/// created; there is no update or delete operation.
///
/// # Request Body
/// - `clientId`: id of an existing client
/// - `valor`: non-negative sale value
/// - `data`: ISO-8601 calendar date, stored verbatim
///
/// # HTTP Status Codes
/// - `201 CREATED`: Sale registered successfully
/// - `400 BAD_REQUEST`: Validation failure or unknown client
pub async fn create_sale(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let client_id = request
        .client_id
        .ok_or_else(|| Error::Validation("ID do cliente inválido".to_string()))?;
    let valor = request
        .valor
        .ok_or_else(|| Error::Validation("Valor deve ser um número positivo".to_string()))?;
    let data = request
        .data
        .ok_or_else(|| Error::Validation("Data inválida".to_string()))?;

    validate_valor(valor)?;
    validate_date(&data, "Data inválida")?;

    let mut conn = state.pool.acquire().await?;

    let sale = queries::sales::create(
        &mut conn,
        &NewSale {
            client_id,
            valor,
            data,
        },
    )
    .await?;

    tracing::info!(sale_id = sale.id, client_id = sale.client_id, "venda registrada");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": sale,
            "message": "Venda registrada com sucesso",
        })),
    ))
}

/// GET /sales/stats
///
/// Daily sales totals over the whole sale table: at most the 30 most recent
/// day groups, most recent first.
///
/// # HTTP Status Codes
/// - `200 OK`: Stats computed successfully
/// - `401/403`: Missing or invalid token
pub async fn daily_stats(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let sales = queries::sales::list(&mut conn).await?;
    let stats = stats::daily_sales_stats(&sales);

    Ok(Json(serde_json::json!({
        "success": true,
        "data": stats,
    })))
}

/// GET /sales/top-clients
///
/// The three top-client rankings. The clients and sales are read as two
/// independent queries without snapshot isolation; a slightly inconsistent
/// cross-ranking view under concurrent writes is accepted.
///
/// # HTTP Status Codes
/// - `200 OK`: Stats computed successfully
/// - `401/403`: Missing or invalid token
pub async fn top_clients(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let clients = queries::clients::list_all(&mut conn).await?;
    let sales = queries::sales::list(&mut conn).await?;
    let stats = stats::top_clients_stats(&clients, &sales);

    Ok(Json(serde_json::json!({
        "success": true,
        "data": stats,
    })))
}
