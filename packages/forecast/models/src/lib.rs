#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Value types for the spatio-temporal forecasting pass.
//!
//! Everything here is transient: produced and consumed within a single
//! forecasting pass and never persisted.

use std::fmt;

use chrono::{Datelike as _, Months, NaiveDate};
use serde::{Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Edge length of a grid cell, in degrees.
pub const GRID_RESOLUTION: f64 = 0.1;

/// A 0.1° × 0.1° grid cell identified by its rounded coordinates.
///
/// Stored as integer tenths of a degree so equality and ordering are exact.
/// Displays and serializes as `"{lat}_{lon}"`, e.g. `"34.0_-118.2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId {
    lat_tenths: i32,
    lon_tenths: i32,
}

impl CellId {
    /// Creates a cell from coordinates already expressed in tenths of a
    /// degree (e.g. `340, -1182` for `"34.0_-118.2"`).
    #[must_use]
    pub const fn from_tenths(lat_tenths: i32, lon_tenths: i32) -> Self {
        Self {
            lat_tenths,
            lon_tenths,
        }
    }

    /// Rounded latitude of the cell.
    #[must_use]
    pub fn latitude(self) -> f64 {
        f64::from(self.lat_tenths) / 10.0
    }

    /// Rounded longitude of the cell.
    #[must_use]
    pub fn longitude(self) -> f64 {
        f64::from(self.lon_tenths) / 10.0
    }

    /// Footprint of the cell: a [`GRID_RESOLUTION`] square anchored at the
    /// rounded coordinates as its south-west corner.
    #[must_use]
    pub fn bounds(self) -> CellBounds {
        let south = self.latitude();
        let west = self.longitude();
        CellBounds {
            south,
            west,
            north: south + GRID_RESOLUTION,
            east: west + GRID_RESOLUTION,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}_{:.1}", self.latitude(), self.longitude())
    }
}

impl Serialize for CellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Axis-aligned footprint of a grid cell in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellBounds {
    /// Southern edge (latitude).
    pub south: f64,
    /// Western edge (longitude).
    pub west: f64,
    /// Northern edge (latitude).
    pub north: f64,
    /// Eastern edge (longitude).
    pub east: f64,
}

/// A calendar month, represented by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    /// The month containing `date` (day-of-month discarded).
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Creates a month from a year and 1-based month number.
    #[must_use]
    pub fn from_ym(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The following calendar month.
    #[must_use]
    pub fn next(self) -> Self {
        self.0.checked_add_months(Months::new(1)).map_or(self, Self)
    }

    /// Day ordinal of the first day (proleptic Gregorian, 0001-01-01 = 1).
    #[must_use]
    pub fn ordinal(self) -> i32 {
        self.0.num_days_from_ce()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One month of a [`MonthlySeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// Calendar month.
    pub month: Month,
    /// Qualifying records in that month.
    pub count: u64,
}

/// Ordered monthly counts for one key.
///
/// One entry per month that had at least one record, ascending by month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySeries<K> {
    /// Grouping key (a grid cell or a crime type).
    pub key: K,
    /// Monthly counts, ascending by month, unique per month.
    pub points: Vec<MonthlyCount>,
}

impl<K> MonthlySeries<K> {
    /// Number of distinct months in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no months.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A prediction for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast<K> {
    /// Grouping key the prediction is for.
    pub key: K,
    /// Month being predicted.
    pub target_month: Month,
    /// Predicted count, floored at zero and truncated.
    pub predicted: u64,
}

/// How the target month is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TargetPolicy {
    /// The month after the reference date (normally today).
    #[default]
    AfterToday,
    /// The month after the latest month present in the data.
    AfterLatest,
}

/// A forecast cell ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellForecast {
    /// Grid cell.
    pub cell: CellId,
    /// Predicted count for the target month.
    pub predicted: u64,
    /// Square footprint of the cell.
    pub bounds: CellBounds,
    /// `predicted / max(predicted)` over all cells, in `(0, 1]`.
    pub intensity: f64,
}

/// A ranked per-crime-type prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForecast {
    /// Raw crime-type string.
    pub crime_type: String,
    /// Predicted count for the target month.
    pub predicted: u64,
}

/// A recent incident location used as a forecast heat point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// Output of the forecast assembler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledResult {
    /// Month every prediction targets.
    pub target_month: Month,
    /// Cells with a positive prediction.
    pub cells: Vec<CellForecast>,
    /// Crime types with a positive prediction, descending by count.
    pub categories: Vec<CategoryForecast>,
    /// Sum of `categories[*].predicted`.
    pub total_predicted: u64,
}

/// Everything one forecasting pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    /// Assembled cell and crime-type forecasts.
    #[serde(flatten)]
    pub assembled: AssembledResult,
    /// Recent locations of incidents whose crime type was forecast.
    pub hotspots: Vec<Hotspot>,
}
