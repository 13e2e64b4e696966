pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod queries;
pub mod services;
pub mod state;
pub mod validation;

pub use config::Config;
pub use database::{DbConn, DbPool};
pub use state::AppState;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Assembles the application router.
///
/// `/auth/login` and `/health` are public; every client and sale route sits
/// behind the bearer-token middleware.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route(
            "/sales",
            get(handlers::sales::list_sales).post(handlers::sales::create_sale),
        )
        .route("/sales/stats", get(handlers::sales::daily_stats))
        .route("/sales/top-clients", get(handlers::sales::top_clients))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/health", get(handlers::health::health_check))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
