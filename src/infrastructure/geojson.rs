// GeoJSON feed schema and event normalization
use crate::domain::event::SeismicEvent;
use chrono::{TimeZone, Utc};
use serde::Deserialize;

/// One feed snapshot as delivered by the USGS GeoJSON endpoints. Unknown
/// fields are ignored; every field the normalizer needs is optional and
/// validated per record.
#[derive(Debug, Deserialize)]
pub struct FeedSnapshot {
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub properties: RawProperties,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawProperties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    /// Milliseconds since the Unix epoch, UTC.
    pub time: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawGeometry {
    /// `[longitude, latitude, depth_km]` per the feed documentation.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// Maps raw feed records into the internal schema. Records missing a
/// required field, or with values outside the schema invariants, are
/// dropped; the batch itself never fails. Input order is preserved.
pub fn normalize(features: Vec<RawFeature>) -> Vec<SeismicEvent> {
    let total = features.len();
    let events: Vec<SeismicEvent> = features.into_iter().filter_map(normalize_record).collect();
    let dropped = total - events.len();
    if dropped > 0 {
        tracing::debug!("dropped {} of {} malformed feed records", dropped, total);
    }
    events
}

fn normalize_record(feature: RawFeature) -> Option<SeismicEvent> {
    let geometry = feature.geometry?;
    if geometry.coordinates.len() < 3 {
        return None;
    }
    let (longitude, latitude, depth_km) = (
        geometry.coordinates[0],
        geometry.coordinates[1],
        geometry.coordinates[2],
    );
    let magnitude = feature.properties.mag?;
    let occurred_at = Utc.timestamp_millis_opt(feature.properties.time?).single()?;

    let event = SeismicEvent::new(
        occurred_at,
        feature.properties.place.unwrap_or_default(),
        magnitude,
        depth_km,
        latitude,
        longitude,
    );
    event.is_valid().then_some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(json: &str) -> FeedSnapshot {
        serde_json::from_str(json).unwrap()
    }

    const FULL_FEATURE: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"generated": 1709294400000, "title": "USGS All Earthquakes, Past Day"},
        "features": [{
            "type": "Feature",
            "properties": {"mag": 4.3, "place": "20 km SSE of Ridgecrest, CA", "time": 1709290800000, "status": "reviewed"},
            "geometry": {"type": "Point", "coordinates": [-117.52, 35.47, 8.2]},
            "id": "ci40123456"
        }]
    }"#;

    #[test]
    fn test_normalize_full_record() {
        let events = normalize(snapshot(FULL_FEATURE).features);
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.place, "20 km SSE of Ridgecrest, CA");
        assert_eq!(e.magnitude, 4.3);
        assert_eq!(e.depth_km, 8.2);
        assert_eq!(e.latitude, 35.47);
        assert_eq!(e.longitude, -117.52);
        assert_eq!(e.occurred_at.timestamp_millis(), 1709290800000);
        assert!(e.is_valid());
    }

    #[test]
    fn test_missing_latitude_drops_exactly_one_record() {
        let json = r#"{"features": [
            {"properties": {"mag": 4.3, "time": 1709290800000}, "geometry": {"coordinates": [-117.52, 35.47, 8.2]}},
            {"properties": {"mag": 2.0, "time": 1709290800000}, "geometry": {"coordinates": [-117.52]}},
            {"properties": {"mag": 1.1, "time": 1709290800000}, "geometry": {"coordinates": [-120.0, 38.1, 2.0]}}
        ]}"#;
        let events = normalize(snapshot(json).features);
        assert_eq!(events.len(), 2);
        // Order preserved across the drop.
        assert_eq!(events[0].magnitude, 4.3);
        assert_eq!(events[1].magnitude, 1.1);
    }

    #[test]
    fn test_missing_magnitude_or_time_drops_record() {
        let json = r#"{"features": [
            {"properties": {"place": "no mag", "time": 1709290800000}, "geometry": {"coordinates": [-117.0, 35.0, 5.0]}},
            {"properties": {"mag": 3.0, "place": "no time"}, "geometry": {"coordinates": [-117.0, 35.0, 5.0]}},
            {"properties": {"mag": 3.0, "time": 1709290800000}}
        ]}"#;
        assert!(normalize(snapshot(json).features).is_empty());
    }

    #[test]
    fn test_out_of_range_coordinates_drop_record() {
        let json = r#"{"features": [
            {"properties": {"mag": 3.0, "time": 1709290800000}, "geometry": {"coordinates": [-181.0, 35.0, 5.0]}},
            {"properties": {"mag": 3.0, "time": 1709290800000}, "geometry": {"coordinates": [-117.0, 95.0, 5.0]}}
        ]}"#;
        assert!(normalize(snapshot(json).features).is_empty());
    }

    #[test]
    fn test_missing_place_becomes_empty_string() {
        let json = r#"{"features": [
            {"properties": {"mag": 3.0, "time": 1709290800000}, "geometry": {"coordinates": [-117.0, 35.0, 5.0]}}
        ]}"#;
        let events = normalize(snapshot(json).features);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].place, "");
    }

    #[test]
    fn test_negative_magnitude_is_kept() {
        let json = r#"{"features": [
            {"properties": {"mag": -0.4, "time": 1709290800000}, "geometry": {"coordinates": [-117.0, 35.0, 5.0]}}
        ]}"#;
        let events = normalize(snapshot(json).features);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].magnitude, -0.4);
    }

    #[test]
    fn test_idempotent() {
        let a = normalize(snapshot(FULL_FEATURE).features);
        let b = normalize(snapshot(FULL_FEATURE).features);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(normalize(snapshot(r#"{"features": []}"#).features).is_empty());
        // A body with no features key at all still parses to an empty batch.
        assert!(normalize(snapshot("{}").features).is_empty());
    }
}
