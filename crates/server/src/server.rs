//! HTTP server for faqbot

use crate::routes;
use axum::Router;
use faqbot_core::AppResult;
use faqbot_knowledge::FaqService;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn router(service: Arc<FaqService>) -> Router {
    Router::new()
        .merge(routes::ask_routes())
        .merge(routes::health_routes())
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until interrupted.
pub async fn run(service: Arc<FaqService>, bind: &str) -> AppResult<()> {
    if !service.answer_available() {
        tracing::warn!("No answer generator configured; /ask will fail until one is");
    }

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
