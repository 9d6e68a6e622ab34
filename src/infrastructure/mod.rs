// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod geojson;
pub mod usgs_client;
