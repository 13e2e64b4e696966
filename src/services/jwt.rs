use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    models::users::AuthUser,
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id as string
    pub sub: String,
    /// User email, echoed into the authenticated identity
    pub email: String,
    /// Expiration time as Unix timestamp
    pub exp: i64,
    /// Issued at time as Unix timestamp
    pub iat: i64,
}

/// Generates a signed token for a logged-in user.
pub fn generate_jwt(user: &AuthUser, secret: &str, expiration_hours: i64) -> Result<String> {
    let now = Utc::now();
    let expiration = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: expiration.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| Error::Internal(format!("Failed to generate JWT: {}", e)))
}

/// Verifies a token and returns its claims. Expired, tampered and malformed
/// tokens all come back as `InvalidToken` (403 on the wire).
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| Error::InvalidToken("Token inválido".to_string()))?;

    Ok(token_data.claims)
}

/// Resolves the identity behind an `Authorization: Bearer <token>` header.
///
/// A missing or non-bearer header fails with `Authentication` (401); a
/// present-but-bad token fails with `InvalidToken` (403).
pub fn authenticate_bearer(auth_header: Option<&str>, secret: &str) -> Result<AuthUser> {
    let token = extract_token_from_header(auth_header)?;
    let claims = verify_jwt(&token, secret)?;

    let id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| Error::InvalidToken("Token inválido".to_string()))?;

    Ok(AuthUser {
        id,
        email: claims.email,
    })
}

/// Extracts the bearer token from the Authorization header, if any.
fn extract_token_from_header(auth_header: Option<&str>) -> Result<String> {
    let header =
        auth_header.ok_or_else(|| Error::Authentication("Token de acesso necessário".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Authentication("Token de acesso necessário".to_string()))?;

    if token.is_empty() {
        return Err(Error::Authentication(
            "Token de acesso necessário".to_string(),
        ));
    }

    Ok(token.to_string())
}
