#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Spatio-temporal aggregation and forecasting.
//!
//! One pass over an immutable [`Snapshot`]:
//!
//! 1. [`grid`] maps every incident to a 0.1° cell.
//! 2. [`aggregate`] counts incidents per (cell, month) and per
//!    (crime type, month).
//! 3. [`trend`] fits a linear trend to each monthly series and predicts
//!    the target month.
//! 4. [`assemble`] joins cell predictions to geography and ranks crime
//!    types.
//!
//! Every stage treats empty input as a normal case and produces empty
//! output; nothing in this crate fails.

pub mod aggregate;
pub mod assemble;
pub mod grid;
pub mod hotspots;
pub mod trend;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use crime_watch_forecast_models::{ForecastReport, Month, TargetPolicy};
use crime_watch_source_models::Snapshot;

use crate::aggregate::{ByCell, ByCrimeType, aggregate, into_series};
use crate::assemble::assemble;
use crate::hotspots::{DEFAULT_LOOKBACK_MONTHS, recent_hotspots};
use crate::trend::{forecast_all, resolve_target_month};

/// Inputs to a forecasting pass besides the snapshot itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastOptions {
    /// How the target month is chosen.
    pub policy: TargetPolicy,
    /// The "current" date for [`TargetPolicy::AfterToday`].
    pub reference_date: NaiveDate,
    /// Hotspot lookback from the latest incident, in months.
    pub hotspot_lookback_months: u32,
}

impl ForecastOptions {
    /// Options targeting the month after `reference_date`.
    #[must_use]
    pub const fn after(reference_date: NaiveDate) -> Self {
        Self {
            policy: TargetPolicy::AfterToday,
            reference_date,
            hotspot_lookback_months: DEFAULT_LOOKBACK_MONTHS,
        }
    }
}

/// Runs the full forecasting pass over a snapshot.
#[must_use]
pub fn run(snapshot: &Snapshot, options: &ForecastOptions) -> ForecastReport {
    let cell_series = into_series(aggregate(snapshot, &ByCell));
    let type_series = into_series(aggregate(snapshot, &ByCrimeType));

    let latest_month = snapshot
        .date_bounds()
        .map(|(_, latest)| Month::containing(latest));
    let target = resolve_target_month(options.policy, options.reference_date, latest_month);

    let cell_forecasts = forecast_all(&cell_series, target);
    let type_forecasts = forecast_all(&type_series, target);

    log::info!(
        "Forecasting {target}: {}/{} cells and {}/{} crime types have enough history",
        cell_forecasts.len(),
        cell_series.len(),
        type_forecasts.len(),
        type_series.len(),
    );

    let forecast_types: BTreeSet<&str> = type_forecasts.iter().map(|f| f.key.as_str()).collect();
    let hotspots = recent_hotspots(snapshot, &forecast_types, options.hotspot_lookback_months);

    let assembled = assemble(target, &cell_forecasts, &type_forecasts);
    log::debug!(
        "Assembled {} cells, {} crime types, {} hotspots",
        assembled.cells.len(),
        assembled.categories.len(),
        hotspots.len()
    );

    ForecastReport {
        assembled,
        hotspots,
    }
}

#[cfg(test)]
mod tests {
    use crime_watch_crime_models::CrimeCategory;
    use crime_watch_source_models::Incident;

    use super::*;

    fn incident(date: &str, crime_type: &str, lat: f64, lon: f64) -> Incident {
        Incident {
            occurred_at: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            crime_type: crime_type.to_string(),
            crime_code: None,
            category: CrimeCategory::Property,
            latitude: lat,
            longitude: lon,
            location: None,
            premise: None,
            status: None,
        }
    }

    /// `count` incidents of one type on the first of the given month.
    fn repeat(
        out: &mut Vec<Incident>,
        month: &str,
        count: usize,
        crime_type: &str,
        lat: f64,
        lon: f64,
    ) {
        for _ in 0..count {
            out.push(incident(&format!("{month}-01"), crime_type, lat, lon));
        }
    }

    fn sample_snapshot() -> Snapshot {
        let mut incidents = Vec::new();
        // Growing cell 34.0_-118.2: 5, 7, 9.
        repeat(&mut incidents, "2025-01", 5, "VEHICLE - STOLEN", 34.05, -118.23);
        repeat(&mut incidents, "2025-02", 7, "VEHICLE - STOLEN", 34.04, -118.21);
        repeat(&mut incidents, "2025-03", 9, "VEHICLE - STOLEN", 34.01, -118.19);
        // A type seen in only one month.
        repeat(&mut incidents, "2025-01", 3, "CRIMINAL HOMICIDE", 33.95, -118.3);
        Snapshot::new(incidents, 0)
    }

    fn options() -> ForecastOptions {
        ForecastOptions {
            policy: TargetPolicy::AfterLatest,
            reference_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            hotspot_lookback_months: DEFAULT_LOOKBACK_MONTHS,
        }
    }

    #[test]
    fn forecasts_growing_cell_and_type() {
        let report = run(&sample_snapshot(), &options());
        let assembled = &report.assembled;
        assert_eq!(assembled.target_month, Month::from_ym(2025, 4).unwrap());

        let cell = assembled
            .cells
            .iter()
            .find(|c| c.cell.to_string() == "34.0_-118.2")
            .unwrap();
        assert_eq!(cell.predicted, 11);

        assert_eq!(assembled.categories.len(), 1);
        assert_eq!(assembled.categories[0].crime_type, "VEHICLE - STOLEN");
        assert_eq!(assembled.categories[0].predicted, 11);
        assert_eq!(assembled.total_predicted, 11);
    }

    #[test]
    fn single_month_type_is_excluded() {
        let report = run(&sample_snapshot(), &options());
        assert!(
            report
                .assembled
                .categories
                .iter()
                .all(|c| c.crime_type != "CRIMINAL HOMICIDE")
        );
        assert!(
            report
                .assembled
                .cells
                .iter()
                .all(|c| c.cell.to_string() != "34.0_-118.3")
        );
    }

    #[test]
    fn hotspots_only_cover_forecast_types() {
        let report = run(&sample_snapshot(), &options());
        assert_eq!(report.hotspots.len(), 21);
    }

    #[test]
    fn after_today_targets_live_month() {
        let report = run(
            &sample_snapshot(),
            &ForecastOptions::after(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()),
        );
        assert_eq!(
            report.assembled.target_month,
            Month::from_ym(2026, 11).unwrap()
        );
        assert!(report.assembled.categories.iter().all(|c| c.predicted > 0));
    }

    #[test]
    fn empty_snapshot_produces_empty_report() {
        let report = run(&Snapshot::default(), &options());
        assert!(report.assembled.cells.is_empty());
        assert!(report.assembled.categories.is_empty());
        assert!(report.hotspots.is_empty());
        assert_eq!(
            report.assembled.target_month,
            Month::from_ym(2026, 11).unwrap()
        );
    }
}
