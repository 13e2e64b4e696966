use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A customer record (not the browser application).
///
/// `data_nascimento` stays a plain string: date fields are validated at the
/// edge and stored verbatim, never normalized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub data_nascimento: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields arrive as options so missing ones surface as 400s from our
/// validators instead of body-rejection errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub data_nascimento: Option<String>,
}

/// Validated client payload handed to the persistence layer.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub nome: String,
    pub email: String,
    pub data_nascimento: String,
}

/// Partial update. Absent and empty-string fields are both "not supplied".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub data_nascimento: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}
