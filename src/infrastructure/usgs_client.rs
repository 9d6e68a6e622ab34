// USGS earthquake feed client
use crate::application::event_feed::{EventFeed, FeedError};
use crate::domain::event::{SeismicEvent, Timeframe};
use crate::infrastructure::config::FeedSettings;
use crate::infrastructure::geojson::{self, FeedSnapshot};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct UsgsFeedClient {
    settings: FeedSettings,
    client: reqwest::Client,
}

impl UsgsFeedClient {
    pub fn new(settings: FeedSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self { settings, client })
    }

    fn snapshot_url(&self, window: Timeframe) -> String {
        if let Some(endpoint) = &self.settings.query_endpoint {
            let start = (Utc::now() - window.duration())
                .to_rfc3339_opts(SecondsFormat::Secs, true);
            let mut url = format!(
                "{}?format=geojson&orderby=time&starttime={}",
                endpoint.trim_end_matches('/'),
                urlencoding::encode(&start)
            );
            if let Some(min) = self.settings.server_min_magnitude {
                url.push_str(&format!("&minmagnitude={}", min));
            }
            url
        } else {
            format!(
                "{}/{}",
                self.settings.summary_base.trim_end_matches('/'),
                window.feed_file()
            )
        }
    }

    async fn fetch_raw(&self, window: Timeframe) -> Result<FeedSnapshot, FeedError> {
        let url = self.snapshot_url(window);
        tracing::debug!("fetching feed snapshot from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl EventFeed for UsgsFeedClient {
    async fn fetch_snapshot(&self, window: Timeframe) -> Result<Vec<SeismicEvent>, FeedError> {
        let snapshot = self.fetch_raw(window).await?;
        Ok(geojson::normalize(snapshot.features))
    }
}
