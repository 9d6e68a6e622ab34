// Presentation adapter - derives map-layer and table data from events
use super::event::SeismicEvent;
use serde::Serialize;

/// Visual-encoding settings for the map column layer.
#[derive(Debug, Clone)]
pub struct EncodingConfig {
    /// Factor applied to (clamped) magnitude to produce column height, meters.
    pub height_scale: f64,
    /// Column footprint radius, meters.
    pub column_radius: f64,
    /// Display label appended to depth values.
    pub depth_unit_label: String,
    /// Ascending magnitude bins; the last bin whose threshold is at or
    /// below the event magnitude supplies the fill color.
    pub color_bins: Vec<ColorBin>,
}

#[derive(Debug, Clone)]
pub struct ColorBin {
    pub min_magnitude: f64,
    pub color: [u8; 4],
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            height_scale: 10_000.0,
            column_radius: 20_000.0,
            depth_unit_label: "km".to_string(),
            color_bins: vec![
                ColorBin {
                    min_magnitude: f64::NEG_INFINITY,
                    color: [46, 204, 113, 160],
                },
                ColorBin {
                    min_magnitude: 3.0,
                    color: [255, 140, 0, 160],
                },
                ColorBin {
                    min_magnitude: 5.0,
                    color: [231, 76, 60, 160],
                },
                ColorBin {
                    min_magnitude: 7.0,
                    color: [146, 43, 33, 200],
                },
            ],
        }
    }
}

/// One column in the 3D map layer. Pure function of an event and the
/// current encoding configuration; no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapColumn {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
    pub radius: f64,
    pub color: [u8; 4],
    pub tooltip: String,
}

/// One row of the companion table, columns in fixed display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub time_utc: String,
    pub place: String,
    pub magnitude: f64,
    pub depth_km: f64,
}

/// Camera for the external map renderer, centered on the displayed events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl ViewState {
    /// Centers on the mean position of the events, or (0, 0) when there
    /// are none.
    pub fn centered_on(events: &[SeismicEvent], zoom: f64, pitch: f64) -> Self {
        let (mut lat, mut lon) = (0.0, 0.0);
        if !events.is_empty() {
            let n = events.len() as f64;
            lat = events.iter().map(|e| e.latitude).sum::<f64>() / n;
            lon = events.iter().map(|e| e.longitude).sum::<f64>() / n;
        }
        Self {
            latitude: lat,
            longitude: lon,
            zoom,
            pitch,
        }
    }
}

/// Column height: linear in magnitude, clamped at zero so negative
/// micro-event magnitudes never produce a negative column.
pub fn column_height(magnitude: f64, config: &EncodingConfig) -> f64 {
    config.height_scale * magnitude.max(0.0)
}

fn column_color(magnitude: f64, config: &EncodingConfig) -> [u8; 4] {
    let mut bins = config.color_bins.iter();
    let Some(first) = bins.next() else {
        return [255, 140, 0, 160];
    };
    // The lowest bin is unbounded below, so every valid magnitude lands
    // in some bin and intensity stays monotonic.
    let mut color = first.color;
    for bin in bins {
        if magnitude >= bin.min_magnitude {
            color = bin.color;
        } else {
            break;
        }
    }
    color
}

fn tooltip(event: &SeismicEvent, config: &EncodingConfig) -> String {
    let place = if event.place.is_empty() {
        "Unknown location"
    } else {
        event.place.as_str()
    };
    format!(
        "{}\nMagnitude: {:.1}\nDepth: {:.1} {}\nTime (UTC): {}",
        place,
        event.magnitude,
        event.depth_km,
        config.depth_unit_label,
        event.occurred_at.to_rfc3339(),
    )
}

/// Derives the two presentation artifacts from a filtered batch: the map
/// column layer (input order) and the table rows (most recent first).
pub fn present(
    events: &[SeismicEvent],
    config: &EncodingConfig,
) -> (Vec<MapColumn>, Vec<TableRow>) {
    let columns = events
        .iter()
        .map(|e| MapColumn {
            longitude: e.longitude,
            latitude: e.latitude,
            height: column_height(e.magnitude, config),
            radius: config.column_radius,
            color: column_color(e.magnitude, config),
            tooltip: tooltip(e, config),
        })
        .collect();

    let mut by_time: Vec<&SeismicEvent> = events.iter().collect();
    by_time.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    let rows = by_time
        .into_iter()
        .map(|e| TableRow {
            time_utc: e.occurred_at.to_rfc3339(),
            place: e.place.clone(),
            magnitude: e.magnitude,
            depth_km: e.depth_km,
        })
        .collect();

    (columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(mag: f64, minute: u32) -> SeismicEvent {
        SeismicEvent::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 10, minute, 0).unwrap(),
            format!("{}km S of Somewhere", minute),
            mag,
            12.5,
            34.2,
            -117.5,
        )
    }

    #[test]
    fn test_empty_input_yields_empty_outputs() {
        let (columns, rows) = present(&[], &EncodingConfig::default());
        assert!(columns.is_empty());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_height_is_non_negative_and_non_decreasing() {
        let config = EncodingConfig::default();
        let magnitudes = [-1.5, -0.1, 0.0, 0.5, 2.1, 4.3, 5.0, 7.8, 9.5];
        let mut prev = f64::NEG_INFINITY;
        for m in magnitudes {
            let h = column_height(m, &config);
            assert!(h >= 0.0, "height for magnitude {m} was negative");
            assert!(h >= prev, "height decreased at magnitude {m}");
            prev = h;
        }
    }

    #[test]
    fn test_color_bins_follow_magnitude() {
        let config = EncodingConfig::default();
        assert_eq!(column_color(1.0, &config), [46, 204, 113, 160]);
        assert_eq!(column_color(3.5, &config), [255, 140, 0, 160]);
        assert_eq!(column_color(5.0, &config), [231, 76, 60, 160]);
        assert_eq!(column_color(8.1, &config), [146, 43, 33, 200]);
    }

    #[test]
    fn test_magnitude_below_lowest_bin_uses_lowest_color() {
        // A finite lower threshold, as the shipped TOML configures it.
        let mut config = EncodingConfig::default();
        config.color_bins[0].min_magnitude = -10.0;
        assert_eq!(column_color(-11.0, &config), [46, 204, 113, 160]);
        assert_eq!(column_color(-9.0, &config), [46, 204, 113, 160]);
        // No bins at all still yields a color.
        config.color_bins.clear();
        assert_eq!(column_color(4.0, &config), [255, 140, 0, 160]);
    }

    #[test]
    fn test_table_sorted_most_recent_first() {
        let events = vec![event(5.0, 5), event(4.3, 45), event(2.1, 20)];
        let (columns, rows) = present(&events, &EncodingConfig::default());
        // Map layer keeps input order, table is time-descending.
        assert_eq!(columns.len(), 3);
        assert_eq!(rows[0].magnitude, 4.3);
        assert_eq!(rows[1].magnitude, 2.1);
        assert_eq!(rows[2].magnitude, 5.0);
    }

    #[test]
    fn test_tooltip_fields() {
        let events = vec![event(4.3, 10)];
        let (columns, _) = present(&events, &EncodingConfig::default());
        let tooltip = &columns[0].tooltip;
        assert!(tooltip.contains("10km S of Somewhere"));
        assert!(tooltip.contains("Magnitude: 4.3"));
        assert!(tooltip.contains("Depth: 12.5 km"));
        assert!(tooltip.contains("2024-03-01T10:10:00+00:00"));
    }

    #[test]
    fn test_tooltip_for_empty_place() {
        let mut e = event(4.3, 10);
        e.place = String::new();
        let (columns, _) = present(&[e], &EncodingConfig::default());
        assert!(columns[0].tooltip.contains("Unknown location"));
    }

    #[test]
    fn test_view_state_centering() {
        let view = ViewState::centered_on(&[], 1.5, 45.0);
        assert_eq!((view.latitude, view.longitude), (0.0, 0.0));

        let mut a = event(4.0, 1);
        a.latitude = 10.0;
        a.longitude = 20.0;
        let mut b = event(4.0, 2);
        b.latitude = 30.0;
        b.longitude = 40.0;
        let view = ViewState::centered_on(&[a, b], 1.5, 45.0);
        assert_eq!((view.latitude, view.longitude), (20.0, 30.0));
        assert_eq!(view.zoom, 1.5);
        assert_eq!(view.pitch, 45.0);
    }
}
