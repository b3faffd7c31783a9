//! Raw table normalization.
//!
//! Coerces coordinates and occurrence timestamps, derives the broad
//! category, and discards rows whose required fields are missing or
//! corrupt. Grouping downstream assumes every incident has valid
//! coordinates and a valid occurrence month.

use chrono::NaiveDateTime;
use crime_watch_source_models::{Incident, RawRow, RawTable, Snapshot};

use crate::parsing::{parse_coordinate, parse_hhmm, parse_text, parse_timestamp};
use crate::source_def::FieldMapping;
use crate::type_mapping::classify_crime_type;

/// Upper-cased column names resolved once per table.
struct Columns {
    occurred_date: String,
    occurred_time: Option<String>,
    crime_type: String,
    crime_code: Option<String>,
    lat: String,
    lng: String,
    location: Option<String>,
    premise: Option<String>,
    status: Option<String>,
}

fn column(name: &str) -> String {
    name.trim().to_uppercase()
}

impl From<&FieldMapping> for Columns {
    fn from(fields: &FieldMapping) -> Self {
        Self {
            occurred_date: column(&fields.occurred_date),
            occurred_time: fields.occurred_time.as_deref().map(column),
            crime_type: column(&fields.crime_type),
            crime_code: fields.crime_code.as_deref().map(column),
            lat: column(&fields.lat),
            lng: column(&fields.lng),
            location: fields.location.as_deref().map(column),
            premise: fields.premise.as_deref().map(column),
            status: fields.status.as_deref().map(column),
        }
    }
}

fn optional_text(row: &RawRow, column: Option<&String>) -> Option<String> {
    column.and_then(|c| parse_text(row.get(c)))
}

/// Extracts the occurrence timestamp, folding in the `HHMM` time column
/// when present and valid.
fn occurred_at(row: &RawRow, columns: &Columns) -> Option<NaiveDateTime> {
    let date_str = row.get(&columns.occurred_date)?.as_str()?;
    let parsed = parse_timestamp(date_str)?;

    let time = columns
        .occurred_time
        .as_ref()
        .and_then(|c| parse_text(row.get(c)))
        .and_then(|s| parse_hhmm(&s));

    Some(time.map_or(parsed, |t| parsed.date().and_time(t)))
}

/// Normalizes a raw table into a [`Snapshot`].
///
/// Rows missing latitude, longitude, or occurrence date are dropped and
/// counted in [`Snapshot::dropped`].
#[must_use]
pub fn normalize(table: &RawTable, fields: &FieldMapping) -> Snapshot {
    let columns = Columns::from(fields);
    let mut incidents = Vec::with_capacity(table.len());
    let mut bad_coordinates = 0_usize;
    let mut bad_dates = 0_usize;

    for row in table.rows() {
        let latitude = parse_coordinate(row.get(&columns.lat));
        let longitude = parse_coordinate(row.get(&columns.lng));
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            bad_coordinates += 1;
            continue;
        };

        let Some(occurred_at) = occurred_at(row, &columns) else {
            bad_dates += 1;
            continue;
        };

        let crime_type = parse_text(row.get(&columns.crime_type)).unwrap_or_default();
        let category = classify_crime_type(&crime_type);

        incidents.push(Incident {
            occurred_at,
            crime_type,
            crime_code: optional_text(row, columns.crime_code.as_ref()),
            category,
            latitude,
            longitude,
            location: optional_text(row, columns.location.as_ref()),
            premise: optional_text(row, columns.premise.as_ref()),
            status: optional_text(row, columns.status.as_ref()),
        });
    }

    let dropped = bad_coordinates + bad_dates;
    if dropped > 0 {
        log::info!(
            "Dropped {dropped} of {} rows ({bad_coordinates} bad coordinates, {bad_dates} bad dates)",
            table.len()
        );
    }
    log::debug!("Normalized {} incidents", incidents.len());

    Snapshot::new(incidents, dropped)
}

#[cfg(test)]
mod tests {
    use crime_watch_crime_models::CrimeCategory;

    use super::*;

    fn table(records: Vec<serde_json::Value>) -> RawTable {
        RawTable::from_pages([records])
    }

    fn la_record(lat: &str, lon: &str, date: &str) -> serde_json::Value {
        serde_json::json!({
            "dr_no": "240100001",
            "date_occ": date,
            "time_occ": "2130",
            "crm_cd": "330",
            "crm_cd_desc": "BURGLARY FROM VEHICLE",
            "lat": lat,
            "lon": lon,
            "location": "700 S  FIGUEROA ST",
            "premis_desc": "PARKING LOT",
            "status_desc": "Invest Cont",
        })
    }

    #[test]
    fn normalizes_la_record() {
        let snapshot = normalize(
            &table(vec![la_record(
                "34.0485",
                "-118.2587",
                "2024-01-15T00:00:00.000",
            )]),
            &FieldMapping::default(),
        );
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.dropped(), 0);

        let incident = &snapshot.incidents()[0];
        assert_eq!(incident.occurred_at.to_string(), "2024-01-15 21:30:00");
        assert_eq!(incident.crime_type, "BURGLARY FROM VEHICLE");
        assert_eq!(incident.category, CrimeCategory::Property);
        assert_eq!(incident.crime_code.as_deref(), Some("330"));
        assert_eq!(incident.location.as_deref(), Some("700 S  FIGUEROA ST"));
        assert_eq!(incident.premise.as_deref(), Some("PARKING LOT"));
        assert_eq!(incident.status.as_deref(), Some("Invest Cont"));
    }

    #[test]
    fn drops_non_numeric_latitude() {
        let snapshot = normalize(
            &table(vec![
                la_record("34.05", "-118.23", "2024-01-15T00:00:00"),
                la_record("not-a-number", "-118.23", "2024-01-16T00:00:00"),
            ]),
            &FieldMapping::default(),
        );
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.dropped(), 1);
    }

    #[test]
    fn drops_missing_longitude() {
        let mut record = la_record("34.05", "-118.23", "2024-01-15T00:00:00");
        record.as_object_mut().unwrap().remove("lon");
        let snapshot = normalize(&table(vec![record]), &FieldMapping::default());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.dropped(), 1);
    }

    #[test]
    fn drops_unparseable_date() {
        let snapshot = normalize(
            &table(vec![la_record("34.05", "-118.23", "sometime in spring")]),
            &FieldMapping::default(),
        );
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.dropped(), 1);
    }

    #[test]
    fn invalid_time_keeps_date_at_midnight() {
        let mut record = la_record("34.05", "-118.23", "2024-01-15T00:00:00");
        record["time_occ"] = serde_json::json!("9999");
        let snapshot = normalize(&table(vec![record]), &FieldMapping::default());
        assert_eq!(
            snapshot.incidents()[0].occurred_at.to_string(),
            "2024-01-15 00:00:00"
        );
    }

    #[test]
    fn missing_crime_type_becomes_empty_other() {
        let mut record = la_record("34.05", "-118.23", "2024-01-15T00:00:00");
        record.as_object_mut().unwrap().remove("crm_cd_desc");
        let snapshot = normalize(&table(vec![record]), &FieldMapping::default());
        let incident = &snapshot.incidents()[0];
        assert_eq!(incident.crime_type, "");
        assert_eq!(incident.category, CrimeCategory::Other);
    }

    #[test]
    fn custom_field_mapping_is_case_insensitive() {
        let fields = FieldMapping {
            occurred_date: "date".to_string(),
            occurred_time: None,
            crime_type: "primary_type".to_string(),
            crime_code: None,
            lat: "latitude".to_string(),
            lng: "longitude".to_string(),
            location: None,
            premise: None,
            status: None,
        };
        let snapshot = normalize(
            &table(vec![serde_json::json!({
                "date": "2024-03-01T10:15:00.000",
                "primary_type": "ROBBERY",
                "latitude": 41.88,
                "longitude": -87.63,
            })]),
            &fields,
        );
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.incidents()[0].category, CrimeCategory::Violent);
    }

    #[test]
    fn empty_table_normalizes_to_empty_snapshot() {
        let snapshot = normalize(&RawTable::new(), &FieldMapping::default());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.dropped(), 0);
    }
}
