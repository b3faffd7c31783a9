#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Raw page table and the canonical normalized incident format.
//!
//! The ingestion client produces a [`RawTable`] from the paginated endpoint.
//! The normalizer turns it into a [`Snapshot`] of [`Incident`]s that every
//! downstream consumer (forecasting, hotspots, dashboard) reads from.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use crime_watch_crime_models::CrimeCategory;
use serde::{Deserialize, Serialize};

/// One raw record, keyed by trimmed upper-case column name.
pub type RawRow = BTreeMap<String, serde_json::Value>;

/// All fetched pages concatenated in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Appends a page of JSON records.
    ///
    /// Non-object records are skipped. Column names are trimmed and
    /// upper-cased so later lookups don't depend on the endpoint's casing.
    pub fn push_page(&mut self, records: Vec<serde_json::Value>) {
        self.rows.reserve(records.len());
        for record in records {
            let serde_json::Value::Object(object) = record else {
                continue;
            };
            let row = object
                .into_iter()
                .map(|(column, value)| (column.trim().to_uppercase(), value))
                .collect();
            self.rows.push(row);
        }
    }

    /// Builds a table from pages in fetch order.
    #[must_use]
    pub fn from_pages(pages: impl IntoIterator<Item = Vec<serde_json::Value>>) -> Self {
        let mut table = Self::new();
        for page in pages {
            table.push_page(page);
        }
        table
    }

    /// Rows in fetch order.
    #[must_use]
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A crime incident that survived normalization.
///
/// Coordinates and occurrence time are always present: rows missing any of
/// them never become an `Incident`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// When the crime occurred.
    pub occurred_at: NaiveDateTime,
    /// Crime type string exactly as the source reported it.
    pub crime_type: String,
    /// Source crime code, if any.
    pub crime_code: Option<String>,
    /// Broad category derived from `crime_type`.
    pub category: CrimeCategory,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Block-level location text.
    pub location: Option<String>,
    /// Premise description (e.g. "STREET", "SINGLE FAMILY DWELLING").
    pub premise: Option<String>,
    /// Case status description (e.g. "Adult Arrest").
    pub status: Option<String>,
}

impl Incident {
    /// Calendar date of occurrence.
    #[must_use]
    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_at.date()
    }
}

/// Immutable normalized table produced by one ingestion pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    incidents: Vec<Incident>,
    dropped: usize,
}

impl Snapshot {
    /// Creates a snapshot from already-normalized incidents.
    #[must_use]
    pub const fn new(incidents: Vec<Incident>, dropped: usize) -> Self {
        Self { incidents, dropped }
    }

    /// Normalized incidents in fetch order.
    #[must_use]
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Rows discarded because a required field was missing or corrupt.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of incidents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Whether the snapshot holds no incidents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Earliest and latest occurrence dates, or `None` when empty.
    #[must_use]
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.incidents.iter().map(Incident::occurred_on);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(date: &str) -> Incident {
        Incident {
            occurred_at: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            crime_type: "BATTERY - SIMPLE ASSAULT".to_string(),
            crime_code: None,
            category: CrimeCategory::Violent,
            latitude: 34.05,
            longitude: -118.24,
            location: None,
            premise: None,
            status: None,
        }
    }

    #[test]
    fn push_page_uppercases_and_trims_columns() {
        let mut table = RawTable::new();
        table.push_page(vec![serde_json::json!({" lat ": "34.1", "crm_cd_desc": "X"})]);
        let row = &table.rows()[0];
        assert!(row.contains_key("LAT"));
        assert!(row.contains_key("CRM_CD_DESC"));
    }

    #[test]
    fn pages_concatenate_in_fetch_order() {
        let table = RawTable::from_pages([
            vec![serde_json::json!({"id": 1}), serde_json::json!({"id": 2})],
            vec![serde_json::json!({"id": 3})],
        ]);
        let ids: Vec<i64> = table
            .rows()
            .iter()
            .map(|r| r["ID"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn non_object_records_are_skipped() {
        let table = RawTable::from_pages([vec![serde_json::json!([1, 2]), serde_json::json!({})]]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn date_bounds_spans_all_incidents() {
        let snapshot = Snapshot::new(
            vec![
                incident("2024-03-02"),
                incident("2024-01-15"),
                incident("2024-02-20"),
            ],
            0,
        );
        let (min, max) = snapshot.date_bounds().unwrap();
        assert_eq!(min.to_string(), "2024-01-15");
        assert_eq!(max.to_string(), "2024-03-02");
    }

    #[test]
    fn empty_snapshot_has_no_bounds() {
        assert!(Snapshot::default().date_bounds().is_none());
    }
}
