//! Grid indexer.
//!
//! Maps coordinates to fixed 0.1° cells. The resolution is a design
//! constant, not derived from data.

use crime_watch_forecast_models::CellId;

/// Rounds a coordinate to the nearest tenth of a degree, in tenths.
///
/// Formatting rounds the exact binary value with ties to even: `34.05`
/// (stored as `34.0499…`) rounds down, and an exact tie such as `34.25`
/// goes to the even tenth `34.2`.
#[allow(clippy::cast_possible_truncation)]
fn round_to_tenths(value: f64) -> i32 {
    let rounded: f64 = format!("{value:.1}").parse().unwrap_or(value);
    (rounded * 10.0).round() as i32
}

/// Returns the grid cell containing the given coordinates.
///
/// Pure function of its inputs: the same coordinates always map to the
/// same cell.
#[must_use]
pub fn assign_cell(lat: f64, lon: f64) -> CellId {
    CellId::from_tenths(round_to_tenths(lat), round_to_tenths(lon))
}
