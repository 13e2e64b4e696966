use std::time::Instant;

use crate::{config::Config, database::DbPool};

/// Application state shared across all HTTP handlers
///
/// Handlers receive the store handle through this struct (never a global),
/// so tests can run against a per-test in-memory pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing the database
    pub pool: DbPool,
    /// Loaded application configuration
    pub config: Config,
    /// Process start instant, reported as uptime by the health endpoint
    pub started_at: Instant,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self {
            pool,
            config,
            started_at: Instant::now(),
        }
    }
}
