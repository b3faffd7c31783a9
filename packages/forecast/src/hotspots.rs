//! Recent incident locations for forecast heat layers.

use std::collections::BTreeSet;

use chrono::Months;
use crime_watch_forecast_models::Hotspot;
use crime_watch_source_models::Snapshot;

/// How far back from the latest incident hotspots reach.
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 6;

/// Returns the locations of incidents of the given crime types that
/// occurred within `lookback_months` of the latest incident in the
/// snapshot.
#[must_use]
pub fn recent_hotspots(
    snapshot: &Snapshot,
    crime_types: &BTreeSet<&str>,
    lookback_months: u32,
) -> Vec<Hotspot> {
    let Some(latest) = snapshot.incidents().iter().map(|i| i.occurred_at).max() else {
        return Vec::new();
    };
    let cutoff = latest
        .checked_sub_months(Months::new(lookback_months))
        .unwrap_or(latest);

    snapshot
        .incidents()
        .iter()
        .filter(|i| i.occurred_at >= cutoff && crime_types.contains(i.crime_type.as_str()))
        .map(|i| Hotspot {
            latitude: i.latitude,
            longitude: i.longitude,
        })
        .collect()
}
