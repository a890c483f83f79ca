//! HTTP gateway: routing and server loop
//!
//! Transport plumbing only. Request bodies are decoded here, core
//! error kinds are mapped to status codes in [`types`], and everything
//! else is delegated to the wallet core.

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
use state::AppState;

/// Build the service router. Split out of [`serve`] so tests can drive
/// the router without binding a socket.
pub fn build_router(state: Arc<AppState>) -> Router {
    let wallet_routes = Router::new()
        .route("/wallets", get(handlers::list_wallets))
        .route("/wallets/{wallet_uuid}", get(handlers::get_wallet))
        .route(
            "/wallets/{wallet_uuid}/operation",
            post(handlers::operate_wallet),
        );

    let app = Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .nest("/api/v1", wallet_routes);

    // [SECURITY] Mock API routes - only compiled when 'mock-api' feature is enabled.
    // Production builds MUST be compiled with `--no-default-features` to exclude this.
    #[cfg(feature = "mock-api")]
    let app = app.nest(
        "/internal/mock",
        Router::new().route("/wallets", post(handlers::create_wallet)),
    );

    app.with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Bind and serve until the process exits
pub async fn serve(config: &GatewayConfig, state: Arc<AppState>) {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                config.port, config.port
            );
            std::process::exit(1);
        }
    };

    println!("🚀 Gateway listening on http://{}", addr);
    println!("📖 API Docs: http://{}/docs", addr);
    println!("💰 Wallet API: /api/v1/wallets/*");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
