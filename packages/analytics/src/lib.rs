#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard statistics.
//!
//! Computes the totals, distributions, and monthly trends the dashboard
//! shows, from the same [`Snapshot`](crime_watch_source_models::Snapshot)
//! the forecaster reads.

pub mod dashboard;
