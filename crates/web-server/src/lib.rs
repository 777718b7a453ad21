use axum::{
    Router,
    routing::{get, post},
};
use executor::OrderExecutor;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub executor: OrderExecutor,
}

/// Builds the router for the order form and its JSON endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::order_form))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/orders", post(handlers::place_order))
        .route("/api/connectivity", get(handlers::connectivity))
        .with_state(state)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, executor: OrderExecutor) -> anyhow::Result<()> {
    let app = router(Arc::new(AppState { executor }));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
