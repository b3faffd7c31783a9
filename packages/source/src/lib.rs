#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime data ingestion and normalization.
//!
//! A [`PageSource`] knows how to fetch one page of raw records from a
//! remote endpoint. [`pagination::fetch_raw_table`] drives it page by page
//! into a [`RawTable`](crime_watch_source_models::RawTable), and
//! [`normalize::normalize`] turns that table into the immutable
//! [`Snapshot`](crime_watch_source_models::Snapshot) every downstream stage
//! reads from.

pub mod normalize;
pub mod pagination;
pub mod parsing;
pub mod progress;
pub mod registry;
pub mod socrata;
pub mod source_def;
pub mod type_mapping;

use async_trait::async_trait;
use chrono::NaiveDate;

/// Errors that can occur during data source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A source definition could not be parsed.
    #[error("Invalid source definition: {message}")]
    Definition {
        /// Description of what went wrong.
        message: String,
    },
}

/// Parameters for one ingestion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// First occurrence date to include.
    pub window_start: NaiveDate,
    /// Last occurrence date to include.
    pub window_end: NaiveDate,
    /// Records requested per page.
    pub page_size: u64,
    /// Upper bound on the total number of records requested.
    pub max_records: u64,
}

/// A single page request against a [`PageSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// First occurrence date to include.
    pub window_start: NaiveDate,
    /// Last occurrence date to include.
    pub window_end: NaiveDate,
    /// Number of records to skip.
    pub offset: u64,
    /// Maximum number of records to return.
    pub limit: u64,
}

/// A remote endpoint that serves raw records one page at a time.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Label for log messages (e.g. `"LA"`).
    fn label(&self) -> &str;

    /// Fetches a single page of raw JSON records.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, the endpoint responds
    /// with a non-success status, or the body is not a JSON array.
    async fn fetch_page(&self, request: &PageRequest)
    -> Result<Vec<serde_json::Value>, SourceError>;
}
