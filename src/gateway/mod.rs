//! HTTP gateway: axum router and server loop.

pub mod handlers;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
};
use tokio::net::TcpListener;

use crate::config::AppConfig;
use state::AppState;

/// Build the full API router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(handlers::users::register))
        .route("/login", post(handlers::users::login));

    let private_routes = Router::new()
        .route("/accounts", post(handlers::accounts::create_account))
        .route("/accounts", get(handlers::accounts::list_accounts))
        .route("/accounts/{id}", get(handlers::accounts::get_account))
        .route("/accounts/{id}", patch(handlers::accounts::adjust_balance))
        .route("/accounts/{id}", delete(handlers::accounts::delete_account))
        .route("/transfers", post(handlers::transfers::create_transfer))
        .route("/transfers", get(handlers::transfers::list_transfers))
        .route("/transfers/{id}", get(handlers::transfers::get_transfer))
        .layer(from_fn_with_state(
            state.clone(),
            crate::user_auth::middleware::jwt_auth_middleware,
        ));

    Router::new()
        .route("/api/v1/health", get(handlers::health::health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1", private_routes)
        .with_state(state)
}

/// Start the HTTP gateway and serve until the process exits.
pub async fn run_server(config: &AppConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
