// Seismic event domain model
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One normalized earthquake record from a feed snapshot.
///
/// Immutable after normalization; filtering produces new subsets rather
/// than editing batches in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SeismicEvent {
    pub occurred_at: DateTime<Utc>,
    pub place: String,
    pub magnitude: f64,
    pub depth_km: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl SeismicEvent {
    pub fn new(
        occurred_at: DateTime<Utc>,
        place: String,
        magnitude: f64,
        depth_km: f64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            occurred_at,
            place,
            magnitude,
            depth_km,
            latitude,
            longitude,
        }
    }

    /// Whether all fields satisfy the schema invariants: finite magnitude
    /// and depth, latitude in [-90, 90], longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.magnitude.is_finite()
            && self.depth_km.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Discrete time-window choices offered to the user, matching the four
/// USGS summary feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    PastHour,
    #[default]
    PastDay,
    PastWeek,
    PastMonth,
}

impl Timeframe {
    /// Summary feed file for this window on the USGS feed host.
    pub fn feed_file(&self) -> &'static str {
        match self {
            Timeframe::PastHour => "all_hour.geojson",
            Timeframe::PastDay => "all_day.geojson",
            Timeframe::PastWeek => "all_week.geojson",
            Timeframe::PastMonth => "all_month.geojson",
        }
    }

    /// Length of the window, resolved against "now" by the filter engine.
    pub fn duration(&self) -> Duration {
        match self {
            Timeframe::PastHour => Duration::hours(1),
            Timeframe::PastDay => Duration::days(1),
            Timeframe::PastWeek => Duration::days(7),
            Timeframe::PastMonth => Duration::days(30),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::PastHour => "Past Hour",
            Timeframe::PastDay => "Past Day",
            Timeframe::PastWeek => "Past 7 Days",
            Timeframe::PastMonth => "Past 30 Days",
        }
    }
}
