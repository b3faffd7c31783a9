//! Forecast assembly.
//!
//! Joins cell forecasts back to cell geography and ranks crime-type
//! forecasts. Zero predictions are dropped from both outputs.

use crime_watch_forecast_models::{
    AssembledResult, CategoryForecast, CellForecast, CellId, Forecast, Month,
};
use geo::{Rect, coord};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};

/// Builds the renderable result from raw per-key forecasts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn assemble(
    target_month: Month,
    cell_forecasts: &[Forecast<CellId>],
    category_forecasts: &[Forecast<String>],
) -> AssembledResult {
    let max_cell = cell_forecasts
        .iter()
        .map(|f| f.predicted)
        .max()
        .unwrap_or(0);

    let mut cells: Vec<CellForecast> = cell_forecasts
        .iter()
        .filter(|f| f.predicted > 0)
        .map(|f| CellForecast {
            cell: f.key,
            predicted: f.predicted,
            bounds: f.key.bounds(),
            intensity: f.predicted as f64 / max_cell as f64,
        })
        .collect();
    cells.sort_by_key(|c| c.cell);

    let mut categories: Vec<CategoryForecast> = category_forecasts
        .iter()
        .filter(|f| f.predicted > 0)
        .map(|f| CategoryForecast {
            crime_type: f.key.clone(),
            predicted: f.predicted,
        })
        .collect();
    categories.sort_by(|a, b| {
        b.predicted
            .cmp(&a.predicted)
            .then_with(|| a.crime_type.cmp(&b.crime_type))
    });

    let total_predicted = categories.iter().map(|c| c.predicted).sum();

    AssembledResult {
        target_month,
        cells,
        categories,
        total_predicted,
    }
}

fn cell_feature(cell: &CellForecast) -> Feature {
    let b = cell.bounds;
    let rect = Rect::new(coord! { x: b.west, y: b.south }, coord! { x: b.east, y: b.north });
    let geometry = Geometry::new(geojson::Value::from(&rect.to_polygon()));

    let mut properties = JsonObject::new();
    properties.insert("cell".to_string(), cell.cell.to_string().into());
    properties.insert("predicted".to_string(), cell.predicted.into());
    properties.insert("intensity".to_string(), cell.intensity.into());

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Renders the cell forecasts as a `GeoJSON` polygon layer.
///
/// Each feature carries `cell`, `predicted`, and `intensity` properties.
#[must_use]
pub fn to_feature_collection(result: &AssembledResult) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: result.cells.iter().map(cell_feature).collect(),
        foreign_members: None,
    }
}
