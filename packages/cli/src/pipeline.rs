//! Ingestion pass shared by every subcommand that needs data.
//!
//! Resolves the source definition, pages through the remote endpoint once
//! and normalizes the result into a [`Snapshot`].

use std::path::Path;
use std::time::Instant;

use chrono::{Duration, NaiveDate};
use crime_watch_cli_utils::{IndicatifProgress, MultiProgress};
use crime_watch_source::source_def::{SourceDefinition, parse_source_toml};
use crime_watch_source::{FetchOptions, normalize::normalize, pagination::fetch_raw_table};
use crime_watch_source::registry;
use crime_watch_source_models::Snapshot;

/// Default ingestion window length, in days before the end date.
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

/// Resolves `--source`: a path to a TOML definition if one exists there,
/// otherwise the id of an embedded definition.
///
/// # Errors
///
/// * If the file can't be read
/// * If the definition fails to parse
/// * If no embedded source has the given id
pub fn load_source(source: Option<&str>) -> Result<SourceDefinition, Box<dyn std::error::Error>> {
    let Some(source) = source else {
        return Ok(registry::find_source(registry::DEFAULT_SOURCE_ID)?);
    };

    let path = Path::new(source);
    if path.is_file() {
        log::debug!("Loading source definition from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        return Ok(parse_source_toml(&contents)?);
    }

    Ok(registry::find_source(source)?)
}

/// Fills in the default window around `today` for missing bounds.
///
/// # Errors
///
/// * If `--from` is later than `--to`
pub fn resolve_window(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), String> {
    let end = to.unwrap_or(today);
    let start = from.unwrap_or(end - Duration::days(DEFAULT_WINDOW_DAYS));
    if start > end {
        return Err(format!("--from {start} is after --to {end}"));
    }
    Ok((start, end))
}

/// Fetches and normalizes one snapshot.
pub async fn ingest(
    source: &SourceDefinition,
    options: &FetchOptions,
    multi: &MultiProgress,
) -> Snapshot {
    let start = Instant::now();
    log::info!(
        "Fetching {} from {} to {} (page size {}, max {} records)",
        source.name(),
        options.window_start,
        options.window_end,
        options.page_size,
        options.max_records
    );

    let client = source.page_source();
    let progress = IndicatifProgress::records_bar(multi, source.name());
    let table = fetch_raw_table(&client, options, &progress).await;
    let snapshot = normalize(&table, &source.fields);

    log::info!(
        "Normalized {} incidents ({} dropped) in {:.1}s",
        snapshot.len(),
        snapshot.dropped(),
        start.elapsed().as_secs_f64()
    );

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_window_is_the_last_year() {
        let (start, end) = resolve_window(None, None, date(2026, 10, 19)).unwrap();
        assert_eq!(start, date(2025, 10, 19));
        assert_eq!(end, date(2026, 10, 19));
    }

    #[test]
    fn explicit_end_shifts_default_start() {
        let (start, end) =
            resolve_window(None, Some(date(2024, 3, 1)), date(2026, 10, 19)).unwrap();
        assert_eq!(start, date(2023, 3, 2));
        assert_eq!(end, date(2024, 3, 1));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let result = resolve_window(
            Some(date(2025, 1, 2)),
            Some(date(2025, 1, 1)),
            date(2026, 1, 1),
        );
        assert_eq!(
            result.unwrap_err(),
            "--from 2025-01-02 is after --to 2025-01-01"
        );
    }

    #[test]
    fn default_source_is_embedded() {
        let source = load_source(None).unwrap();
        assert_eq!(source.id(), registry::DEFAULT_SOURCE_ID);
    }

    #[test]
    fn unknown_source_id_fails() {
        assert!(load_source(Some("nowhere_pd")).is_err());
    }
}
