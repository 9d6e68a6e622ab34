// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::{load_app_config, load_view_config};
use crate::infrastructure::usgs_client::UsgsFeedClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, health_check, refresh_feed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let app_config = load_app_config()?;
    let view_config = load_view_config()?;

    // Create feed client (infrastructure layer)
    let feed = Arc::new(UsgsFeedClient::new(app_config.feed)?);

    // Create service (application layer)
    let dashboard_service = DashboardService::new(feed, &view_config);

    // Load an initial snapshot. A failed fetch is shown on the dashboard
    // and retried via /refresh, so startup continues either way.
    if let Err(e) = dashboard_service.refresh(None).await {
        tracing::warn!("initial feed fetch failed: {}", e);
    }

    // Create application state
    let state = Arc::new(AppState { dashboard_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/refresh", post(refresh_feed))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = app_config.server.bind.parse()?;
    println!("Starting quake-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
