use tracing_subscriber::EnvFilter;

use loja_backend::{AppState, Config, create_router, database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let pool = database::init_pool(&config.database).await?;
    database::run_migrations(&pool).await?;
    database::seed(&pool, &config).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(pool, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "servidor iniciado");
    tracing::info!("health check em http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("sinal de desligamento recebido, encerrando servidor");
    }
}
