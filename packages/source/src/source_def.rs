//! Config-driven source definition.
//!
//! [`SourceDefinition`] captures everything unique about a data source in a
//! serializable config struct: where to fetch pages from and which columns
//! hold the fields the normalizer needs.

use serde::Deserialize;

use crate::SourceError;
use crate::socrata::SocrataClient;

/// Default records per page when a definition doesn't set one.
pub const DEFAULT_PAGE_SIZE: u64 = 50_000;

const fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// A complete, config-driven crime data source definition.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceDefinition {
    /// Unique identifier (e.g., `"la_pd"`).
    pub id: String,
    /// Human-readable name (e.g., `"Los Angeles Police Department"`).
    pub name: String,
    /// City the data covers.
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// How to fetch raw pages.
    pub fetcher: FetcherConfig,
    /// Column names for normalization.
    #[serde(default)]
    pub fields: FieldMapping,
    /// Optional URL to the human-readable data portal page for this source.
    /// If not set, one is derived from the fetcher config.
    #[serde(default)]
    pub portal_url: Option<String>,
}

/// How to fetch raw data from the source API.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FetcherConfig {
    /// Socrata SODA API (`$limit/$offset/$order/$where`).
    Socrata {
        /// Base Socrata API URL.
        api_url: String,
        /// Date column for ordering and window filtering.
        date_column: String,
        /// Records per page.
        #[serde(default = "default_page_size")]
        page_size: u64,
    },
}

impl FetcherConfig {
    /// Derives a human-readable portal URL.
    ///
    /// Socrata `/resource/{id}.json` maps to `/d/{id}`.
    fn derive_portal_url(&self) -> Option<String> {
        match self {
            Self::Socrata { api_url, .. } => {
                // https://data.lacity.org/resource/2nrs-mtv8.json
                // -> https://data.lacity.org/d/2nrs-mtv8
                api_url.find("/resource/").map(|idx| {
                    let base = &api_url[..idx];
                    let rest = &api_url[idx + "/resource/".len()..];
                    let dataset_id = rest.strip_suffix(".json").unwrap_or(rest);
                    format!("{base}/d/{dataset_id}")
                })
            }
        }
    }
}

/// Maps raw column names to incident fields.
///
/// Names are matched case-insensitively against the upper-cased columns of
/// the raw table. Defaults match the LAPD Socrata schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    /// Occurrence date (or full timestamp) column.
    pub occurred_date: String,
    /// Optional `HHMM` time-of-day column combined with `occurred_date`.
    pub occurred_time: Option<String>,
    /// Raw crime-type description column.
    pub crime_type: String,
    /// Crime code column.
    pub crime_code: Option<String>,
    /// Latitude column.
    pub lat: String,
    /// Longitude column.
    pub lng: String,
    /// Block-level location text column.
    pub location: Option<String>,
    /// Premise description column.
    pub premise: Option<String>,
    /// Case status column.
    pub status: Option<String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            occurred_date: "DATE_OCC".to_string(),
            occurred_time: Some("TIME_OCC".to_string()),
            crime_type: "CRM_CD_DESC".to_string(),
            crime_code: Some("CRM_CD".to_string()),
            lat: "LAT".to_string(),
            lng: "LON".to_string(),
            location: Some("LOCATION".to_string()),
            premise: Some("PREMIS_DESC".to_string()),
            status: Some("STATUS_DESC".to_string()),
        }
    }
}

impl SourceDefinition {
    /// Returns the unique source identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Portal URL, explicit or derived from the fetcher.
    #[must_use]
    pub fn portal_url(&self) -> Option<String> {
        self.portal_url
            .clone()
            .or_else(|| self.fetcher.derive_portal_url())
    }

    /// Records per page configured for this source.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        match &self.fetcher {
            FetcherConfig::Socrata { page_size, .. } => *page_size,
        }
    }

    /// Builds the page source for this definition.
    #[must_use]
    pub fn page_source(&self) -> SocrataClient {
        match &self.fetcher {
            FetcherConfig::Socrata {
                api_url,
                date_column,
                ..
            } => SocrataClient::new(api_url, date_column, &self.name),
        }
    }
}

/// Parses a [`SourceDefinition`] from a TOML string.
///
/// # Errors
///
/// Returns [`SourceError::Definition`] if the TOML is malformed or missing
/// required fields.
pub fn parse_source_toml(toml_str: &str) -> Result<SourceDefinition, SourceError> {
    toml::de::from_str(toml_str).map_err(|e| SourceError::Definition {
        message: e.to_string(),
    })
}
