//! Client CRUD handlers
//!
//! Handlers follow the thin-layer pattern: they validate inputs, delegate to
//! the queries layer, and shape responses. The nested, partly duplicated
//! client envelope (`info`/`estatisticas`/`duplicado`, plus the list's
//! `meta`/`redundante` fields) is a frozen wire contract the browser
//! application parses; it is reproduced here exactly.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::{
    error::{Error, Result},
    middleware::auth::AuthenticatedUser,
    models::clients::{
        Client, CreateClientRequest, NewClient, PaginationParams, UpdateClientRequest,
    },
    models::sales::Sale,
    queries,
    services::auth,
    state::AppState,
    validation::{validate_date, validate_email, validate_nome},
};

/// Shapes one client as the nested duplicated envelope.
fn format_client(client: &Client, sales: &[Sale]) -> serde_json::Value {
    let vendas: Vec<serde_json::Value> = sales
        .iter()
        .map(|sale| serde_json::json!({ "data": sale.data, "valor": sale.valor }))
        .collect();

    serde_json::json!({
        "info": {
            "nomeCompleto": client.nome,
            "detalhes": {
                "email": client.email,
                "nascimento": client.data_nascimento,
            },
        },
        "estatisticas": {
            "vendas": vendas,
        },
        "duplicado": {
            "nomeCompleto": client.nome,
        },
    })
}

/// GET /clients
///
/// Lists clients with optional `search`, `page` and `limit` query
/// parameters, each entry enriched with the client's sales.
///
/// # Returns
/// `{data: {clientes: [...]}, meta: {registroTotal, pagina},
/// redundante: {status}}` - note the absence of a top-level `success`
/// field; this response predates the uniform envelope and stays as is.
///
/// # HTTP Status Codes
/// - `200 OK`: Clients retrieved successfully
/// - `401/403`: Missing or invalid token
/// - `500 INTERNAL_SERVER_ERROR`: Database error
pub async fn list_clients(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let page = params.page.unwrap_or(1).max(1);
    let clients = queries::clients::list(&mut conn, &params).await?;
    let total = queries::clients::count(&mut conn, params.search.as_deref()).await?;

    let mut clientes = Vec::with_capacity(clients.len());
    for client in &clients {
        let sales = queries::sales::list_by_client(&mut conn, client.id).await?;
        clientes.push(format_client(client, &sales));
    }

    Ok(Json(serde_json::json!({
        "data": {
            "clientes": clientes,
        },
        "meta": {
            "registroTotal": total,
            "pagina": page,
        },
        "redundante": {
            "status": "ok",
        },
    })))
}

/// GET /clients/:id
///
/// Gets a single client by id, as plain fields (no nested envelope).
///
/// # HTTP Status Codes
/// - `200 OK`: Client retrieved successfully
/// - `404 NOT_FOUND`: Client not found
pub async fn get_client(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let client = queries::clients::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| Error::NotFound("Cliente não encontrado".to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": client,
    })))
}

/// POST /clients
///
/// Creates a client after validating name, email syntax and birth date, and
/// checking the (normalized) email is not already registered.
///
/// # HTTP Status Codes
/// - `201 CREATED`: Client created successfully
/// - `400 BAD_REQUEST`: Validation failure or duplicate email
pub async fn create_client(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let nome = request.nome.as_deref().unwrap_or_default().trim().to_string();
    let email_raw = request.email.as_deref().unwrap_or_default();
    let data_nascimento = request.data_nascimento.as_deref().unwrap_or_default();

    validate_nome(&nome)?;
    validate_email(email_raw)?;
    validate_date(data_nascimento, "Data de nascimento inválida")?;

    let email = auth::normalize_email(email_raw);

    let mut conn = state.pool.acquire().await?;

    if queries::clients::find_by_email(&mut conn, &email)
        .await?
        .is_some()
    {
        return Err(Error::Conflict("Email já cadastrado".to_string()));
    }

    let client = queries::clients::create(
        &mut conn,
        &NewClient {
            nome,
            email,
            data_nascimento: data_nascimento.to_string(),
        },
    )
    .await?;

    tracing::info!(client_id = client.id, "cliente criado");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": format_client(&client, &[]),
            "message": "Cliente criado com sucesso",
        })),
    ))
}

/// PUT /clients/:id
///
/// Partially updates a client. Absent and empty-string fields are ignored;
/// supplied values are validated; a changed email must stay unique. When
/// nothing usable was supplied the request is reported as a no-op, not as
/// success.
///
/// # HTTP Status Codes
/// - `200 OK`: Client updated successfully
/// - `400 BAD_REQUEST`: Validation failure, duplicate email, or no change
/// - `404 NOT_FOUND`: Client not found
pub async fn update_client(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<Json<serde_json::Value>> {
    let nome = request.nome.as_deref().filter(|v| !v.is_empty());
    let email_raw = request.email.as_deref().filter(|v| !v.is_empty());
    let data_nascimento = request.data_nascimento.as_deref().filter(|v| !v.is_empty());

    if let Some(nome) = nome {
        validate_nome(nome)?;
    }
    if let Some(email) = email_raw {
        validate_email(email)?;
    }
    if let Some(data) = data_nascimento {
        validate_date(data, "Data de nascimento inválida")?;
    }

    let email = email_raw.map(auth::normalize_email);

    let mut conn = state.pool.acquire().await?;

    let existing = queries::clients::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| Error::NotFound("Cliente não encontrado".to_string()))?;

    if let Some(email) = email.as_deref() {
        if email != existing.email
            && queries::clients::find_by_email(&mut conn, email)
                .await?
                .is_some()
        {
            return Err(Error::Conflict("Email já cadastrado".to_string()));
        }
    }

    let changes = UpdateClientRequest {
        nome: nome.map(str::to_string),
        email,
        data_nascimento: data_nascimento.map(str::to_string),
    };

    let updated = queries::clients::update(&mut conn, id, &changes)
        .await?
        .ok_or_else(|| Error::Validation("Nenhuma alteração realizada".to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": format_client(&updated, &[]),
        "message": "Cliente atualizado com sucesso",
    })))
}

/// DELETE /clients/:id
///
/// Deletes a client; the store cascades the delete to the client's sales.
///
/// # HTTP Status Codes
/// - `200 OK`: Client deleted successfully
/// - `400 BAD_REQUEST`: Row disappeared between the check and the delete
/// - `404 NOT_FOUND`: Client not found
pub async fn delete_client(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    queries::clients::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| Error::NotFound("Cliente não encontrado".to_string()))?;

    if !queries::clients::delete(&mut conn, id).await? {
        return Err(Error::Validation("Erro ao excluir cliente".to_string()));
    }

    tracing::info!(client_id = id, "cliente excluído");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cliente excluído com sucesso",
    })))
}
