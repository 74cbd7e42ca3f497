//! HTTP surface over the prompt services.
//!
//! Three POST endpoints mirror the services one-to-one; a GET health check
//! reports the configured model.

pub mod error;
pub mod routes;

use axum::Router;
use axum::routing::{get, post};
use improver_application::LocalBackend;
use improver_core::api::{
    ANALYZE_CHANGES_PATH, GENERATE_RESPONSE_PATH, HEALTH_PATH, IMPROVE_PROMPT_PATH,
};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared handler state; the services themselves are stateless.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<LocalBackend>,
}

impl AppState {
    pub fn new(backend: LocalBackend) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(GENERATE_RESPONSE_PATH, post(routes::generate_response))
        .route(IMPROVE_PROMPT_PATH, post(routes::improve_prompt))
        .route(ANALYZE_CHANGES_PATH, post(routes::analyze_changes))
        .route(HEALTH_PATH, get(routes::health))
        .with_state(state)
}

/// Serves on an already bound listener until the task is dropped.
pub async fn serve_listener(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, model = state.backend.model(), "Prompt Improver server listening");
    axum::serve(listener, router(state)).await
}

/// Binds `bind` and serves until the task is dropped.
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    serve_listener(listener, state).await
}
