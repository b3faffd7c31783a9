#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Broad crime category taxonomy.
//!
//! Raw crime-type strings from the data source are kept verbatim for
//! per-type forecasting. For display-tier grouping every incident is also
//! bucketed into one of the [`CrimeCategory`] variants.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Top-level crime category groupings used by the dashboard.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeCategory {
    /// Crimes against persons (homicide, assault, rape, robbery)
    Violent,
    /// Crimes against property (theft, burglary, vehicle crimes, shoplifting)
    Property,
    /// Everything else
    Other,
}

impl CrimeCategory {
    /// Human-readable label (e.g. `"Violent"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Violent => "Violent",
            Self::Property => "Property",
            Self::Other => "Other",
        }
    }

    /// Returns all variants of this enum, in classifier priority order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Violent, Self::Property, Self::Other]
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn string_forms_roundtrip() {
        for category in CrimeCategory::all() {
            let s = category.to_string();
            assert_eq!(CrimeCategory::from_str(&s).unwrap(), *category);
        }
        assert_eq!(CrimeCategory::Violent.as_ref(), "VIOLENT");
    }

    #[test]
    fn serializes_screaming_snake_case() {
        let json = serde_json::to_string(&CrimeCategory::Property).unwrap();
        assert_eq!(json, "\"PROPERTY\"");
    }

    #[test]
    fn labels_are_title_case() {
        assert_eq!(CrimeCategory::Violent.label(), "Violent");
        assert_eq!(CrimeCategory::Other.label(), "Other");
    }
}
