//! Broad category classification.
//!
//! Maps a raw crime-type description to a [`CrimeCategory`] using fixed
//! keyword sets. Violent keywords are checked before property keywords, so
//! "ROBBERY - VEHICLE" is violent.

use crime_watch_crime_models::CrimeCategory;

const VIOLENT_KEYWORDS: &[&str] = &["ASSAULT", "HOMICIDE", "RAPE", "ROBBERY"];

const PROPERTY_KEYWORDS: &[&str] = &["THEFT", "BURGLARY", "VEHICLE", "SHOPLIFTING"];

/// Classifies a raw crime-type string into a broad category.
///
/// Matching is case-insensitive substring containment.
#[must_use]
pub fn classify_crime_type(raw: &str) -> CrimeCategory {
    let upper = raw.to_uppercase();

    if contains_any(&upper, VIOLENT_KEYWORDS) {
        return CrimeCategory::Violent;
    }
    if contains_any(&upper, PROPERTY_KEYWORDS) {
        return CrimeCategory::Property;
    }

    CrimeCategory::Other
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violent_keywords() {
        assert_eq!(
            classify_crime_type("ASSAULT WITH DEADLY WEAPON, AGGRAVATED ASSAULT"),
            CrimeCategory::Violent
        );
        assert_eq!(
            classify_crime_type("CRIMINAL HOMICIDE"),
            CrimeCategory::Violent
        );
        assert_eq!(classify_crime_type("RAPE, FORCIBLE"), CrimeCategory::Violent);
    }

    #[test]
    fn property_keywords() {
        assert_eq!(classify_crime_type("VEHICLE - STOLEN"), CrimeCategory::Property);
        assert_eq!(
            classify_crime_type("BURGLARY FROM VEHICLE"),
            CrimeCategory::Property
        );
        assert_eq!(
            classify_crime_type("SHOPLIFTING - PETTY THEFT ($950 & UNDER)"),
            CrimeCategory::Property
        );
    }

    #[test]
    fn violent_wins_over_property() {
        assert_eq!(
            classify_crime_type("ROBBERY OF VEHICLE"),
            CrimeCategory::Violent
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_crime_type("petty theft"), CrimeCategory::Property);
        assert_eq!(classify_crime_type("Robbery"), CrimeCategory::Violent);
    }

    #[test]
    fn unmatched_is_other() {
        assert_eq!(
            classify_crime_type("VANDALISM - MISDEAMEANOR ($399 OR UNDER)"),
            CrimeCategory::Other
        );
        assert_eq!(classify_crime_type(""), CrimeCategory::Other);
    }
}
