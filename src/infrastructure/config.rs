use crate::domain::view::{ColorBin, EncodingConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub feed: FeedSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    /// Base URL of the fixed summary feeds (all_hour.geojson etc.).
    pub summary_base: String,
    /// Optional fdsnws-style query endpoint. When set, fetches carry
    /// server-side starttime/minmagnitude parameters; the filter engine
    /// still re-filters client-side either way.
    #[serde(default)]
    pub query_endpoint: Option<String>,
    /// Server-side magnitude floor for the query endpoint.
    #[serde(default)]
    pub server_min_magnitude: Option<f64>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ViewConfig {
    #[serde(default)]
    pub encoding: EncodingSettings,
    #[serde(default)]
    pub camera: CameraSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EncodingSettings {
    #[serde(default = "default_height_scale")]
    pub height_scale: f64,
    #[serde(default = "default_column_radius")]
    pub column_radius: f64,
    #[serde(default = "default_depth_unit")]
    pub depth_unit_label: String,
    #[serde(default)]
    pub color_bins: Vec<ColorBinSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ColorBinSettings {
    pub min_magnitude: f64,
    pub color: [u8; 4],
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            height_scale: default_height_scale(),
            column_radius: default_column_radius(),
            depth_unit_label: default_depth_unit(),
            color_bins: Vec::new(),
        }
    }
}

impl EncodingSettings {
    /// Builds the domain encoding configuration. An empty bin list falls
    /// back to the built-in gradient.
    pub fn to_encoding(&self) -> EncodingConfig {
        let defaults = EncodingConfig::default();
        let color_bins = if self.color_bins.is_empty() {
            defaults.color_bins
        } else {
            self.color_bins
                .iter()
                .map(|b| ColorBin {
                    min_magnitude: b.min_magnitude,
                    color: b.color,
                })
                .collect()
        };
        EncodingConfig {
            height_scale: self.height_scale,
            column_radius: self.column_radius,
            depth_unit_label: self.depth_unit_label.clone(),
            color_bins,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CameraSettings {
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_pitch")]
    pub pitch: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            pitch: default_pitch(),
        }
    }
}

fn default_height_scale() -> f64 {
    10_000.0
}

fn default_column_radius() -> f64 {
    20_000.0
}

fn default_depth_unit() -> String {
    "km".to_string()
}

fn default_zoom() -> f64 {
    1.5
}

fn default_pitch() -> f64 {
    45.0
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/feed"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_view_config() -> anyhow::Result<ViewConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/encoding"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
