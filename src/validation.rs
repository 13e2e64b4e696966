//! Input validation for the request handlers.
//!
//! Every helper returns `Ok(())` or a `Validation` error carrying the
//! user-facing message the API reports for that field.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{Error, Result};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
    })
}

/// Validates email syntax. The caller normalizes before storage.
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() || email.len() > 254 || !email_regex().is_match(email) {
        return Err(Error::Validation("Email inválido".to_string()));
    }
    Ok(())
}

/// Passwords must carry at least 6 characters.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 6 {
        return Err(Error::Validation(
            "Senha deve ter pelo menos 6 caracteres".to_string(),
        ));
    }
    Ok(())
}

/// Client names must be non-empty after trimming.
pub fn validate_nome(nome: &str) -> Result<()> {
    if nome.trim().is_empty() {
        return Err(Error::Validation("Nome é obrigatório".to_string()));
    }
    Ok(())
}

/// Dates must be ISO-8601 calendar dates (`YYYY-MM-DD`). The string itself
/// is stored verbatim; only its shape is checked here.
pub fn validate_date(value: &str, message: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| Error::Validation(message.to_string()))
}

/// Sale values must be finite and non-negative.
pub fn validate_valor(valor: f64) -> Result<()> {
    if !valor.is_finite() || valor < 0.0 {
        return Err(Error::Validation(
            "Valor deve ser um número positivo".to_string(),
        ));
    }
    Ok(())
}
