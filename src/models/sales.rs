use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single purchase event tied to one client. Immutable once created;
/// removed only by the owning client's delete cascade.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub client_id: i64,
    pub valor: f64,
    pub data: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub client_id: Option<i64>,
    pub valor: Option<f64>,
    pub data: Option<String>,
}

/// Validated sale payload handed to the persistence layer.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub client_id: i64,
    pub valor: f64,
    pub data: String,
}
