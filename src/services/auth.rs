//! Login verification and password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{
    database::DbConn,
    error::{Error, Result},
    models::users::{AuthUser, LoginRequest},
    queries,
    validation::{validate_email, validate_password},
};

/// Emails are compared and stored trimmed and lowercased, so casing or
/// whitespace variants of a known address resolve to the same record.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hashes a password with Argon2, producing a PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Verifies a password against a stored PHC hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Authenticates a login request. Unknown emails and wrong passwords fail
/// with the same message so the response never reveals which one it was.
pub async fn login_user(conn: &mut DbConn, request: &LoginRequest) -> Result<AuthUser> {
    let email = request.email.as_deref().unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();

    validate_email(email)?;
    validate_password(password)?;

    let email = normalize_email(email);

    let user = queries::users::find_by_email(conn, &email)
        .await?
        .ok_or_else(|| Error::Authentication("Email ou senha inválidos".to_string()))?;

    if !verify_password(password, &user.password_hash)? {
        tracing::warn!(%email, "tentativa de login com senha incorreta");
        return Err(Error::Authentication(
            "Email ou senha inválidos".to_string(),
        ));
    }

    Ok(user.into())
}
