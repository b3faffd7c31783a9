//! Source registry: loads source definitions from embedded TOML configs.
//!
//! Each `.toml` file in `packages/source/sources/` is baked into the binary
//! at compile time via [`include_str!`].

use crate::SourceError;
use crate::source_def::{SourceDefinition, parse_source_toml};

/// TOML configs embedded at compile time.
const SOURCE_TOMLS: &[(&str, &str)] = &[
    ("la", include_str!("../sources/la.toml")),
    (
        "la_historical",
        include_str!("../sources/la_historical.toml"),
    ),
];

/// Id of the source used when none is selected.
pub const DEFAULT_SOURCE_ID: &str = "la_pd";

/// Returns all configured source definitions, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if any TOML config is malformed (the configs are embedded, so
/// this is caught by the registry tests).
#[must_use]
pub fn all_sources() -> Vec<SourceDefinition> {
    SOURCE_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_source_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Looks up an embedded source definition by id.
///
/// # Errors
///
/// Returns [`SourceError::Definition`] if no embedded source has that id.
pub fn find_source(id: &str) -> Result<SourceDefinition, SourceError> {
    all_sources()
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| SourceError::Definition {
            message: format!("unknown source id: {id}"),
        })
}
