#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for crime watch.
//!
//! Every data subcommand runs one ingestion pass and hands the resulting
//! snapshot to the forecaster or the dashboard summary, printing JSON to
//! stdout. Logging goes through [`crime_watch_cli_utils::init_logger`] so
//! log lines and the download progress bar share the terminal.

mod pipeline;

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use crime_watch_analytics::dashboard::{DEFAULT_TOP_N, date_bounds, summarize};
use crime_watch_analytics_models::DashboardFilter;
use crime_watch_cli_utils::MultiProgress;
use crime_watch_forecast::ForecastOptions;
use crime_watch_forecast::assemble::to_feature_collection;
use crime_watch_forecast_models::TargetPolicy;
use crime_watch_source::FetchOptions;
use crime_watch_source::registry::all_sources;
use crime_watch_source_models::Snapshot;

/// Default cap on records fetched per invocation.
const DEFAULT_MAX_RECORDS: u64 = 150_000;

#[derive(Parser)]
#[command(name = "crime_watch", about = "Crime trend forecasting and summaries")]
struct Cli {
    #[command(flatten)]
    fetch: FetchArgs,
    #[command(subcommand)]
    command: Commands,
}

/// Options controlling the ingestion pass.
#[derive(Args)]
struct FetchArgs {
    /// Source definition: a TOML file path or an embedded source id
    #[arg(long, global = true)]
    source: Option<String>,
    /// First occurrence date to fetch (default: 365 days before `--to`)
    #[arg(long, global = true)]
    from: Option<NaiveDate>,
    /// Last occurrence date to fetch (default: today)
    #[arg(long, global = true)]
    to: Option<NaiveDate>,
    /// Records requested per page (default: the source's own page size)
    #[arg(long, global = true)]
    page_size: Option<u64>,
    /// Maximum number of records to fetch
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_RECORDS)]
    max_records: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast next month's incident counts per grid cell and crime type
    Forecast {
        /// Which month to forecast
        #[arg(long, value_enum, default_value_t = TargetArg::AfterToday)]
        target: TargetArg,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Summarize the fetched incidents for a dashboard
    Summary {
        /// Comma-separated list of crime types to include (default: all)
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,
        /// Number of crime types to rank
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
    },
    /// List the embedded data sources
    Sources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetArg {
    /// The month after today
    AfterToday,
    /// The month after the latest month in the data
    AfterLatest,
}

impl From<TargetArg> for TargetPolicy {
    fn from(value: TargetArg) -> Self {
        match value {
            TargetArg::AfterToday => Self::AfterToday,
            TargetArg::AfterLatest => Self::AfterLatest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Assembled forecast with hotspots
    Json,
    /// Forecast cells as a `GeoJSON` feature collection
    Geojson,
}

fn print_sources() {
    println!("{:<20} {:<45} PORTAL", "ID", "NAME");
    println!("{}", "-".repeat(100));
    for source in all_sources() {
        println!(
            "{:<20} {:<45} {}",
            source.id(),
            source.name(),
            source.portal_url().unwrap_or_default()
        );
    }
}

/// Runs the single ingestion pass for a data subcommand.
async fn load_snapshot(
    args: &FetchArgs,
    today: NaiveDate,
    multi: &MultiProgress,
) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let source = pipeline::load_source(args.source.as_deref())?;
    let (window_start, window_end) = pipeline::resolve_window(args.from, args.to, today)?;
    let options = FetchOptions {
        window_start,
        window_end,
        page_size: args.page_size.unwrap_or_else(|| source.page_size()),
        max_records: args.max_records,
    };

    Ok(pipeline::ingest(&source, &options, multi).await)
}

/// Builds the dashboard filter. Bounds not given on the command line
/// default to the dates actually present in the snapshot.
fn summary_filter(args: &FetchArgs, types: Vec<String>, snapshot: &Snapshot) -> DashboardFilter {
    let bounds = date_bounds(snapshot);
    DashboardFilter {
        date_from: args.from.or_else(|| bounds.map(|(min, _)| min)),
        date_to: args.to.or_else(|| bounds.map(|(_, max)| max)),
        crime_types: types
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crime_watch_cli_utils::init_logger();
    let cli = Cli::parse();
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Sources => print_sources(),
        Commands::Forecast { target, format } => {
            let snapshot = load_snapshot(&cli.fetch, today, &multi).await?;
            let forecast_options = ForecastOptions {
                policy: target.into(),
                ..ForecastOptions::after(today)
            };
            let report = crime_watch_forecast::run(&snapshot, &forecast_options);
            let output = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&report)?,
                OutputFormat::Geojson => {
                    serde_json::to_string_pretty(&to_feature_collection(&report.assembled))?
                }
            };
            println!("{output}");
        }
        Commands::Summary { types, top } => {
            let snapshot = load_snapshot(&cli.fetch, today, &multi).await?;
            let filter = summary_filter(&cli.fetch, types, &snapshot);
            let summary = summarize(&snapshot, &filter, top);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;
    use crime_watch_crime_models::CrimeCategory;
    use crime_watch_source_models::Incident;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("crime_watch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn forecast_target_defaults_to_after_today() {
        let Commands::Forecast { target, format } = parse(&["forecast"]).command else {
            panic!("expected forecast");
        };
        assert_eq!(TargetPolicy::from(target), TargetPolicy::AfterToday);
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn forecast_target_accepts_after_latest() {
        let cli = parse(&["forecast", "--target", "after-latest", "--format", "geojson"]);
        let Commands::Forecast { target, format } = cli.command else {
            panic!("expected forecast");
        };
        assert_eq!(TargetPolicy::from(target), TargetPolicy::AfterLatest);
        assert_eq!(format, OutputFormat::Geojson);
    }

    #[test]
    fn unknown_target_is_rejected() {
        let result = Cli::try_parse_from(["crime_watch", "forecast", "--target", "after-lunch"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_fetch_options_follow_the_subcommand() {
        let cli = parse(&[
            "summary",
            "--from",
            "2024-01-01",
            "--max-records",
            "10",
            "--types",
            "A,B",
        ]);
        assert_eq!(cli.fetch.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(cli.fetch.max_records, 10);
        assert!(cli.fetch.page_size.is_none());
        let Commands::Summary { types, top } = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(types, vec!["A", "B"]);
        assert_eq!(top, DEFAULT_TOP_N);
    }

    #[test]
    fn summary_filter_defaults_to_snapshot_dates() {
        let at = |d: u32| {
            NaiveDate::from_ymd_opt(2024, 5, d)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        };
        let incident = |d: u32| Incident {
            occurred_at: at(d),
            crime_type: "BURGLARY".to_string(),
            crime_code: None,
            category: CrimeCategory::Property,
            latitude: 34.05,
            longitude: -118.25,
            location: None,
            premise: None,
            status: None,
        };
        let snapshot = Snapshot::new(vec![incident(3), incident(20)], 0);

        let cli = parse(&["summary", "--to", "2024-05-10", "--types", " BURGLARY ,"]);
        let Commands::Summary { types, .. } = cli.command else {
            panic!("expected summary");
        };
        let filter = summary_filter(&cli.fetch, types, &snapshot);
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 5, 3));
        assert_eq!(filter.date_to, NaiveDate::from_ymd_opt(2024, 5, 10));
        assert_eq!(filter.crime_types, BTreeSet::from(["BURGLARY".to_string()]));
    }
}
