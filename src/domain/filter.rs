// Filter engine - magnitude threshold and time window predicates
use super::event::{SeismicEvent, Timeframe};
use chrono::{DateTime, Utc};

/// Applies the minimum-magnitude threshold and the time window to a
/// normalized batch. Both predicates must hold. Input order is preserved.
///
/// Pure: `now` is passed in explicitly so the window bound is deterministic.
/// An empty result is a valid outcome, not an error.
pub fn filter_events(
    events: &[SeismicEvent],
    min_magnitude: f64,
    window: Timeframe,
    now: DateTime<Utc>,
) -> Vec<SeismicEvent> {
    let cutoff = now - window.duration();
    events
        .iter()
        .filter(|e| e.magnitude >= min_magnitude && e.occurred_at > cutoff && e.occurred_at <= now)
        .cloned()
        .collect()
}

/// Observed magnitude range of a batch, used to bound the threshold slider.
/// `None` when the batch is empty.
pub fn magnitude_bounds(events: &[SeismicEvent]) -> Option<(f64, f64)> {
    let mut iter = events.iter().map(|e| e.magnitude);
    let first = iter.next()?;
    let bounds = iter.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));
    Some(bounds)
}
