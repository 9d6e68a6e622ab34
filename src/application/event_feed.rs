// Feed trait for upstream seismic-event access
use crate::domain::event::{SeismicEvent, Timeframe};
use async_trait::async_trait;
use thiserror::Error;

/// Failure modes of one fetch attempt. There is no retry policy; the
/// caller surfaces the error and the user retries explicitly.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("feed returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("feed response did not match the expected schema: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait EventFeed: Send + Sync {
    /// Fetch one snapshot of recent events for the given window, already
    /// normalized. Exactly one outbound call per invocation, no caching.
    async fn fetch_snapshot(&self, window: Timeframe) -> Result<Vec<SeismicEvent>, FeedError>;
}
