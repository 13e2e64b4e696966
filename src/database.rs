//! Pool construction, embedded migrations and the boot seed.

use std::str::FromStr;

use secrecy::ExposeSecret;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::{
    config::{Config, DatabaseConfig},
    error::{Error, Result},
    models::clients::NewClient,
    models::sales::NewSale,
    queries,
    services::auth,
};

/// Database connection pool type
pub type DbPool = sqlx::SqlitePool;

/// Database connection type - supports both pool connections and transactions
pub type DbConn = sqlx::SqliteConnection;

/// Opens the SQLite pool. Foreign keys must be on for the sales cascade.
pub async fn init_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(Error::Sqlx)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(Error::Sqlx)?;

    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| Error::Internal(format!("Failed to run migrations: {}", e)))
}

/// Seeds the admin user and, when enabled and the store is empty, the demo
/// dataset. Inserts run sequentially and are not wrapped in a transaction;
/// a partially applied seed is completed on the next boot.
pub async fn seed(pool: &DbPool, config: &Config) -> Result<()> {
    let mut conn = pool.acquire().await?;

    ensure_admin_user(&mut conn, config).await?;

    if config.seed.demo_data {
        seed_demo_data(&mut conn).await?;
    }

    Ok(())
}

async fn ensure_admin_user(conn: &mut DbConn, config: &Config) -> Result<()> {
    let email = auth::normalize_email(&config.seed.admin_email);

    if queries::users::find_by_email(conn, &email).await?.is_some() {
        return Ok(());
    }

    let password_hash = auth::hash_password(config.seed.admin_password.expose_secret())?;
    queries::users::create(conn, &email, &password_hash).await?;
    tracing::info!(%email, "usuário administrador criado");

    Ok(())
}

/// Inserts the sample clients and sales the frontend demo expects, but only
/// into an empty clients table.
async fn seed_demo_data(conn: &mut DbConn) -> Result<()> {
    if queries::clients::count(conn, None).await? > 0 {
        return Ok(());
    }

    let sample_clients: &[(&str, &str, &str)] = &[
        ("Ana Beatriz", "ana.b@example.com", "1992-05-01"),
        ("Carlos Eduardo", "cadu@example.com", "1987-08-15"),
        ("Maria Silva", "maria@example.com", "1990-03-20"),
        ("João Santos", "joao@example.com", "1985-12-10"),
        ("Pedro Oliveira", "pedro@example.com", "1995-07-22"),
        ("Fernanda Costa", "fernanda@example.com", "1988-11-14"),
        ("Lucas Mendes", "lucas@example.com", "1993-04-08"),
    ];

    let mut client_ids = Vec::with_capacity(sample_clients.len());
    for (nome, email, data_nascimento) in sample_clients {
        let client = queries::clients::create(
            conn,
            &NewClient {
                nome: (*nome).to_string(),
                email: (*email).to_string(),
                data_nascimento: (*data_nascimento).to_string(),
            },
        )
        .await?;
        client_ids.push(client.id);
    }

    // (sample client index, valor, data)
    let sample_sales: &[(usize, f64, &str)] = &[
        // Ana Beatriz - highest total volume
        (0, 150.00, "2024-01-01"),
        (0, 50.00, "2024-01-02"),
        (0, 200.00, "2024-01-03"),
        (0, 300.00, "2024-01-04"),
        (0, 100.00, "2024-01-05"),
        // Carlos Eduardo - highest average per sale
        (1, 500.00, "2024-01-01"),
        (1, 450.00, "2024-01-03"),
        (1, 480.00, "2024-01-05"),
        // Maria Silva - highest frequency (most distinct days)
        (2, 80.00, "2024-01-01"),
        (2, 120.00, "2024-01-02"),
        (2, 90.00, "2024-01-03"),
        (2, 150.00, "2024-01-04"),
        (2, 110.00, "2024-01-05"),
        (2, 95.00, "2024-01-06"),
        (2, 130.00, "2024-01-07"),
        // João Santos
        (3, 120.00, "2024-01-01"),
        (3, 80.00, "2024-01-05"),
        (3, 200.00, "2024-01-08"),
        // Pedro Oliveira
        (4, 180.00, "2024-01-02"),
        (4, 220.00, "2024-01-04"),
        (4, 160.00, "2024-01-06"),
        (4, 190.00, "2024-01-08"),
        // Fernanda Costa
        (5, 250.00, "2024-01-01"),
        (5, 180.00, "2024-01-03"),
        (5, 320.00, "2024-01-05"),
        (5, 150.00, "2024-01-07"),
        // Lucas Mendes
        (6, 90.00, "2024-01-02"),
        (6, 140.00, "2024-01-04"),
        (6, 110.00, "2024-01-06"),
        (6, 170.00, "2024-01-08"),
        (6, 130.00, "2024-01-09"),
    ];

    for (index, valor, data) in sample_sales {
        queries::sales::create(
            conn,
            &NewSale {
                client_id: client_ids[*index],
                valor: *valor,
                data: (*data).to_string(),
            },
        )
        .await?;
    }

    tracing::info!(
        clients = sample_clients.len(),
        sales = sample_sales.len(),
        "dados de exemplo inseridos"
    );

    Ok(())
}
