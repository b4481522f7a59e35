use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/static/script.js", get(handlers::script))
        .route("/analyze", get(handlers::analyze))
        .route("/ping", get(handlers::ping))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serve the app on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: AppState) -> es_core::Result<()> {
    if !state.requester.is_configured() {
        tracing::warn!("⚠️ GEMINI_API_KEY not found. /analyze will fail until it is set.");
    }
    let app = create_app(state).await;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
