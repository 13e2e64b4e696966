//! Bearer-token authentication middleware.
//!
//! Client and sale routes sit behind this gate; `/auth/login` and `/health`
//! do not. The identity comes straight from the verified token claims, so
//! the gate never touches the store.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::{error::Result, services::jwt, state::AppState};

/// Authenticated user extracted from the bearer token
///
/// Added to request extensions after successful verification, for handler
/// access via `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
}

/// Verifies the `Authorization: Bearer <token>` header and forwards the
/// request with the decoded identity attached.
///
/// # Behavior
/// 1. Missing or non-bearer header fails with 401
/// 2. Malformed, tampered or expired token fails with 403
/// 3. On success, `AuthenticatedUser` lands in request extensions
///
/// # Usage
/// Apply to protected routes using `route_layer()`:
///
/// ```ignore
/// Router::new()
///     .route("/clients", get(list_clients))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());

    let user = jwt::authenticate_bearer(auth_header, state.config.jwt.secret.expose_secret())?;

    request.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        email: user.email,
    });

    Ok(next.run(request).await)
}
