// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;

pub struct AppState {
    pub dashboard_service: DashboardService,
}
