// HTTP request handlers
use crate::application::dashboard_service::RefreshError;
use crate::domain::dashboard::DashboardView;
use crate::domain::event::Timeframe;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub min_magnitude: Option<f64>,
    pub window: Option<Timeframe>,
}

#[derive(Deserialize)]
pub struct RefreshQuery {
    pub window: Option<Timeframe>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard view. Query parameters update the bound controls
/// and re-derive from the cached batch; this never triggers a fetch.
pub async fn get_dashboard(
    Query(query): Query<DashboardQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<DashboardView> {
    Json(
        state
            .dashboard_service
            .dashboard(query.min_magnitude, query.window)
            .await,
    )
}

/// Explicit re-fetch of the feed snapshot.
pub async fn refresh_feed(
    Query(query): Query<RefreshQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.dashboard_service.refresh(query.window).await {
        Ok(count) => {
            Json(serde_json::json!({ "events": count })).into_response()
        }
        Err(e @ (RefreshError::Busy | RefreshError::Superseded)) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!("feed refresh failed: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}
