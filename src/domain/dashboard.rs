// Dashboard aggregate handed to the rendering collaborators
use super::event::Timeframe;
use super::view::{MapColumn, TableRow, ViewState};
use serde::Serialize;

/// Observed magnitude range of the current batch, used to bound the
/// threshold slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagnitudeBounds {
    pub min: f64,
    pub max: f64,
}

/// Everything one render of the dashboard needs: the map column layer,
/// the table, the camera, and the control/indicator state.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub columns: Vec<MapColumn>,
    pub rows: Vec<TableRow>,
    pub view_state: ViewState,
    pub window: Timeframe,
    pub window_label: &'static str,
    pub min_magnitude: f64,
    pub magnitude_bounds: Option<MagnitudeBounds>,
    pub displayed: usize,
    pub total: usize,
    /// Message from the most recent failed fetch, if any. The data shown
    /// alongside it is the last successfully fetched batch.
    pub fetch_error: Option<String>,
}
