//! Dashboard summary computation.

use std::collections::BTreeMap;

use chrono::{Datelike as _, NaiveDate, Timelike as _, Weekday};
use crime_watch_analytics_models::{
    CrimeTypeCount, DashboardFilter, DashboardSummary, HourCount, WeekdayCount,
};
use crime_watch_crime_models::CrimeCategory;
use crime_watch_forecast_models::{Month, MonthlyCount};
use crime_watch_source_models::{Incident, Snapshot};

/// Number of crime types shown when the caller doesn't choose.
pub const DEFAULT_TOP_N: usize = 5;

/// Status substring that marks an incident as cleared by arrest
/// (e.g. "Adult Arrest", "Juv Arrest").
const ARREST_MARKER: &str = "Arrest";

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn matches(incident: &Incident, filter: &DashboardFilter) -> bool {
    let date = incident.occurred_on();
    filter.date_from.is_none_or(|from| date >= from)
        && filter.date_to.is_none_or(|to| date <= to)
        && (filter.crime_types.is_empty() || filter.crime_types.contains(&incident.crime_type))
}

/// Monthly counts from the first to the last month seen, with empty months
/// filled in as zero.
fn monthly_counts<'a>(incidents: impl Iterator<Item = &'a Incident>) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<Month, u64> = BTreeMap::new();
    for incident in incidents {
        *counts
            .entry(Month::containing(incident.occurred_on()))
            .or_insert(0) += 1;
    }

    let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut month = first;
    while month <= last {
        series.push(MonthlyCount {
            month,
            count: counts.get(&month).copied().unwrap_or(0),
        });
        month = month.next();
    }
    series
}

/// Earliest and latest occurrence dates in the snapshot. Filter bounds
/// the caller leaves open default to these.
#[must_use]
pub fn date_bounds(snapshot: &Snapshot) -> Option<(NaiveDate, NaiveDate)> {
    snapshot.date_bounds()
}

/// Summarizes the incidents in `snapshot` that pass `filter`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(snapshot: &Snapshot, filter: &DashboardFilter, top_n: usize) -> DashboardSummary {
    let selected: Vec<&Incident> = snapshot
        .incidents()
        .iter()
        .filter(|i| matches(i, filter))
        .collect();

    let total = selected.len() as u64;
    let count_category = |category: CrimeCategory| {
        selected.iter().filter(|i| i.category == category).count() as u64
    };
    let violent = count_category(CrimeCategory::Violent);
    let property = count_category(CrimeCategory::Property);

    let arrests = selected
        .iter()
        .filter(|i| {
            i.status
                .as_deref()
                .is_some_and(|s| s.contains(ARREST_MARKER))
        })
        .count();
    let arrest_rate = if selected.is_empty() {
        0.0
    } else {
        arrests as f64 / selected.len() as f64 * 100.0
    };

    let mut type_counts: BTreeMap<&str, u64> = BTreeMap::new();
    let mut weekday_counts = [0_u64; 7];
    let mut hour_counts: BTreeMap<u32, u64> = BTreeMap::new();
    for incident in &selected {
        *type_counts.entry(incident.crime_type.as_str()).or_insert(0) += 1;
        weekday_counts[incident.occurred_at.weekday().num_days_from_monday() as usize] += 1;
        *hour_counts.entry(incident.occurred_at.hour()).or_insert(0) += 1;
    }

    let mut top_crime_types: Vec<CrimeTypeCount> = type_counts
        .into_iter()
        .map(|(crime_type, count)| CrimeTypeCount {
            crime_type: crime_type.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps name order among ties.
    top_crime_types.sort_by(|a, b| b.count.cmp(&a.count));
    top_crime_types.truncate(top_n);

    let by_weekday = WEEKDAYS
        .iter()
        .zip(weekday_counts)
        .map(|(day, count)| WeekdayCount {
            weekday: weekday_name(*day).to_string(),
            count,
        })
        .collect();

    let by_hour = hour_counts
        .into_iter()
        .map(|(hour, count)| HourCount { hour, count })
        .collect();

    let monthly = monthly_counts(selected.iter().copied());
    let monthly_violent = monthly_counts(
        selected
            .iter()
            .copied()
            .filter(|i| i.category == CrimeCategory::Violent),
    );
    let monthly_property = monthly_counts(
        selected
            .iter()
            .copied()
            .filter(|i| i.category == CrimeCategory::Property),
    );

    log::debug!(
        "Summarized {total} of {} incidents ({violent} violent, {property} property)",
        snapshot.len()
    );

    DashboardSummary {
        total,
        violent,
        property,
        arrest_rate,
        top_crime_types,
        by_weekday,
        by_hour,
        monthly,
        monthly_violent,
        monthly_property,
    }
}
