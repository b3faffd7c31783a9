//! Temporal aggregation.
//!
//! Buckets every incident of a snapshot by (key, occurrence month) and
//! groups the buckets into one [`MonthlySeries`] per key. Ordered maps
//! keep the output independent of ingestion order.

use std::collections::BTreeMap;

use crime_watch_forecast_models::{CellId, Month, MonthlyCount, MonthlySeries};
use crime_watch_source_models::{Incident, Snapshot};

use crate::grid::assign_cell;

/// Selects the grouping key for an incident.
pub trait GroupKey {
    /// Key type.
    type Key: Ord + Clone;

    /// Key for one incident.
    fn key(&self, incident: &Incident) -> Self::Key;
}

/// Groups incidents by 0.1° grid cell.
pub struct ByCell;

impl GroupKey for ByCell {
    type Key = CellId;

    fn key(&self, incident: &Incident) -> CellId {
        assign_cell(incident.latitude, incident.longitude)
    }
}

/// Groups incidents by their raw crime-type string.
pub struct ByCrimeType;

impl GroupKey for ByCrimeType {
    type Key = String;

    fn key(&self, incident: &Incident) -> String {
        incident.crime_type.clone()
    }
}

/// Record counts keyed by (key, month).
pub type MonthlyCounts<K> = BTreeMap<(K, Month), u64>;

/// Counts incidents per (key, month). Each incident contributes exactly one.
#[must_use]
pub fn aggregate<G: GroupKey>(snapshot: &Snapshot, grouping: &G) -> MonthlyCounts<G::Key> {
    let mut counts = MonthlyCounts::new();
    for incident in snapshot.incidents() {
        let month = Month::containing(incident.occurred_on());
        *counts.entry((grouping.key(incident), month)).or_insert(0) += 1;
    }
    counts
}

/// Splits (key, month) counts into one ascending series per key.
#[must_use]
pub fn into_series<K: Ord>(counts: MonthlyCounts<K>) -> Vec<MonthlySeries<K>> {
    let mut series: Vec<MonthlySeries<K>> = Vec::new();
    for ((key, month), count) in counts {
        let point = MonthlyCount { month, count };
        match series.last_mut() {
            Some(last) if last.key == key => last.points.push(point),
            _ => series.push(MonthlySeries {
                key,
                points: vec![point],
            }),
        }
    }
    series
}
