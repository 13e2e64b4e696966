use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite connection string, e.g. `sqlite://loja.db`.
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default = "default_jwt_secret")]
    pub secret: SecretString,
    pub expiration_hours: i64,
}

/// Seed data applied at boot: the admin login plus the optional demo dataset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    pub admin_email: String,
    #[serde(skip_serializing, default = "default_admin_password")]
    pub admin_password: SecretString,
    pub demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables, with defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            // Override with environment variables using `LOJA__` prefix and `__` separator
            // e.g., LOJA__SERVER__PORT=8080, LOJA__JWT__SECRET=...
            .add_source(
                config::Environment::with_prefix("LOJA")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}

fn default_jwt_secret() -> SecretString {
    SecretString::from("seu_jwt_secret_super_seguro_aqui")
}

fn default_admin_password() -> SecretString {
    SecretString::from("admin123")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://loja.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_jwt_secret(),
            expiration_hours: 24,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@loja.com".to_string(),
            admin_password: default_admin_password(),
            demo_data: true,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use serde to serialize to pretty JSON
        // Secrets are automatically skipped due to #[serde(skip_serializing)]
        match serde_json::to_string_pretty(&self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "Error serializing config"),
        }
    }
}
