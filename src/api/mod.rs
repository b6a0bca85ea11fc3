use crate::core::enumerator::SubdomainEnumerator;
use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;

pub struct AppState {
    pub enumerator: SubdomainEnumerator,
}

impl AppState {
    pub fn new(enumerator: SubdomainEnumerator) -> Self {
        Self { enumerator }
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/enumerate", post(handlers::enumerate))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(bind_addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_app(state)).await?;
    Ok(())
}
