// Dashboard service - Binds view parameters to the filter/present pipeline
use crate::application::event_feed::{EventFeed, FeedError};
use crate::domain::dashboard::{DashboardView, MagnitudeBounds};
use crate::domain::event::{SeismicEvent, Timeframe};
use crate::domain::filter::{filter_events, magnitude_bounds};
use crate::domain::view::{present, EncodingConfig, ViewState};
use crate::infrastructure::config::ViewConfig;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

const DEFAULT_MIN_MAGNITUDE: f64 = 2.5;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("a fetch is already in flight")]
    Busy,

    #[error("fetch superseded by a newer request; result discarded")]
    Superseded,

    #[error("fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// The one piece of session state: the current normalized batch and the
/// two user-bound parameters. Replaced wholesale on each successful
/// fetch, never merged.
struct Session {
    events: Vec<SeismicEvent>,
    min_magnitude: f64,
    window: Timeframe,
    fetch_generation: u64,
    fetch_in_flight: bool,
    last_fetch_error: Option<String>,
}

impl Session {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
            window: Timeframe::default(),
            fetch_generation: 0,
            fetch_in_flight: false,
            last_fetch_error: None,
        }
    }
}

pub struct DashboardService {
    feed: Arc<dyn EventFeed>,
    encoding: EncodingConfig,
    camera_zoom: f64,
    camera_pitch: f64,
    session: Arc<Mutex<Session>>,
}

impl DashboardService {
    pub fn new(feed: Arc<dyn EventFeed>, view_config: &ViewConfig) -> Self {
        Self {
            feed,
            encoding: view_config.encoding.to_encoding(),
            camera_zoom: view_config.camera.zoom,
            camera_pitch: view_config.camera.pitch,
            session: Arc::new(Mutex::new(Session::new())),
        }
    }

    /// Applies any changed parameters, then re-derives the view from the
    /// cached batch. Never re-fetches; parameter changes are synchronous.
    pub async fn dashboard(
        &self,
        min_magnitude: Option<f64>,
        window: Option<Timeframe>,
    ) -> DashboardView {
        let mut session = self.session.lock().await;
        if let Some(m) = min_magnitude {
            session.min_magnitude = m;
        }
        if let Some(w) = window {
            session.window = w;
        }
        self.derive(&session)
    }

    /// Explicit re-fetch. The batch is replaced wholesale on success; on
    /// failure the prior batch stays displayed and the error is recorded
    /// for the dashboard's indicator. A second refresh while one is in
    /// flight is rejected, and a result arriving for a superseded
    /// generation is discarded rather than merged.
    pub async fn refresh(&self, window: Option<Timeframe>) -> Result<usize, RefreshError> {
        let (generation, window) = {
            let mut session = self.session.lock().await;
            if session.fetch_in_flight {
                return Err(RefreshError::Busy);
            }
            session.fetch_in_flight = true;
            session.fetch_generation += 1;
            if let Some(w) = window {
                session.window = w;
            }
            (session.fetch_generation, session.window)
        };

        // The fetch and its bookkeeping run in their own task: if the
        // caller is dropped mid-request, the snapshot still resolves or
        // fails and the in-flight flag is cleared either way.
        let feed = self.feed.clone();
        let session = self.session.clone();
        let fetch = tokio::spawn(async move {
            let result = feed.fetch_snapshot(window).await;

            let mut session = session.lock().await;
            if session.fetch_generation != generation {
                return Err(RefreshError::Superseded);
            }
            session.fetch_in_flight = false;
            match result {
                Ok(events) => {
                    let count = events.len();
                    tracing::info!("feed snapshot replaced: {} events", count);
                    session.events = events;
                    session.last_fetch_error = None;
                    Ok(count)
                }
                Err(e) => {
                    tracing::warn!("feed fetch failed: {}", e);
                    session.last_fetch_error = Some(e.to_string());
                    Err(e.into())
                }
            }
        });

        match fetch.await {
            Ok(outcome) => outcome,
            Err(e) => {
                // The fetch task itself died (panic); release the flag so
                // the next refresh is not locked out.
                let mut session = self.session.lock().await;
                if session.fetch_generation == generation {
                    session.fetch_in_flight = false;
                    session.last_fetch_error = Some(e.to_string());
                }
                Err(e.into())
            }
        }
    }

    fn derive(&self, session: &Session) -> DashboardView {
        let filtered = filter_events(
            &session.events,
            session.min_magnitude,
            session.window,
            Utc::now(),
        );
        let (columns, rows) = present(&filtered, &self.encoding);
        let view_state = ViewState::centered_on(&filtered, self.camera_zoom, self.camera_pitch);
        DashboardView {
            displayed: filtered.len(),
            total: session.events.len(),
            columns,
            rows,
            view_state,
            window: session.window,
            window_label: session.window.label(),
            min_magnitude: session.min_magnitude,
            magnitude_bounds: magnitude_bounds(&session.events)
                .map(|(min, max)| MagnitudeBounds { min, max }),
            fetch_error: session.last_fetch_error.clone(),
        }
    }
}
