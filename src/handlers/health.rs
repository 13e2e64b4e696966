//! Health check handler
//!
//! Public endpoint for load balancers and monitoring; reports whether the
//! store answers a trivial query and how many clients it holds.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;

use crate::{error::Result, queries, state::AppState};

/// GET /health
///
/// # Returns
/// On success: `{status: "OK", database: "Connected", clientsCount,
/// timestamp, uptime}`. On store failure: 500 with `{status: "ERROR",
/// message, timestamp}` - the underlying error is logged, not echoed.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let timestamp = Utc::now().to_rfc3339();
    let uptime = state.started_at.elapsed().as_secs_f64();

    match count_clients(&state).await {
        Ok(count) => Json(serde_json::json!({
            "status": "OK",
            "database": "Connected",
            "clientsCount": count,
            "timestamp": timestamp,
            "uptime": uptime,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "ERROR",
                    "message": "Database connection failed",
                    "timestamp": timestamp,
                })),
            )
                .into_response()
        }
    }
}

async fn count_clients(state: &AppState) -> Result<i64> {
    let mut conn = state.pool.acquire().await?;
    queries::clients::count(&mut conn, None).await
}
