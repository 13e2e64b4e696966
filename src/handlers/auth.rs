use axum::{extract::State, response::Json};
use secrecy::ExposeSecret;

use crate::{
    error::Result,
    models::users::LoginRequest,
    services::{auth, jwt},
    state::AppState,
};

/// POST /auth/login
///
/// Authenticates a user with email and password and issues a bearer token.
///
/// # Request Body
/// - `email`: User's email address
/// - `password`: User's password (minimum 6 characters)
///
/// # Returns
/// `{success, data: {token, user: {id, email}}}`
///
/// # HTTP Status Codes
/// - `200 OK`: Authentication successful
/// - `400 BAD_REQUEST`: Invalid email or short password
/// - `401 UNAUTHORIZED`: Unknown email or wrong password
/// - `500 INTERNAL_SERVER_ERROR`: Database error
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let user = auth::login_user(&mut conn, &request).await?;

    let token = jwt::generate_jwt(
        &user,
        state.config.jwt.secret.expose_secret(),
        state.config.jwt.expiration_hours,
    )?;

    tracing::info!(user_id = user.id, "login realizado");

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "token": token,
            "user": user,
        },
    })))
}
