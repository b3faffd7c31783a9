#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard filter and summary types.
//!
//! The summary is a pure data product; rendering it is up to the caller.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use crime_watch_forecast_models::MonthlyCount;
use serde::{Deserialize, Serialize};

/// Restricts which incidents a summary covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFilter {
    /// First occurrence date to include.
    pub date_from: Option<NaiveDate>,
    /// Last occurrence date to include.
    pub date_to: Option<NaiveDate>,
    /// Crime types to include. Empty means all types.
    #[serde(default)]
    pub crime_types: BTreeSet<String>,
}

/// Incident count for one crime type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeTypeCount {
    /// Raw crime-type string.
    pub crime_type: String,
    /// Number of incidents.
    pub count: u64,
}

/// Incident count for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayCount {
    /// Day name (e.g. `"Monday"`).
    pub weekday: String,
    /// Number of incidents.
    pub count: u64,
}

/// Incident count for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourCount {
    /// Hour (0-23).
    pub hour: u32,
    /// Number of incidents.
    pub count: u64,
}

/// Aggregate statistics over a filtered snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Incidents matching the filter.
    pub total: u64,
    /// Violent incidents.
    pub violent: u64,
    /// Property incidents.
    pub property: u64,
    /// Percentage (0-100) of incidents whose status mentions an arrest.
    pub arrest_rate: f64,
    /// Most frequent crime types, descending.
    pub top_crime_types: Vec<CrimeTypeCount>,
    /// Counts for Monday through Sunday.
    pub by_weekday: Vec<WeekdayCount>,
    /// Counts per hour, ascending, hours without incidents omitted.
    pub by_hour: Vec<HourCount>,
    /// Monthly counts over all incidents, gaps filled with zero.
    pub monthly: Vec<MonthlyCount>,
    /// Monthly counts of violent incidents.
    pub monthly_violent: Vec<MonthlyCount>,
    /// Monthly counts of property incidents.
    pub monthly_property: Vec<MonthlyCount>,
}
