//! Trend forecaster.
//!
//! Fits an ordinary least-squares line `count = slope * ordinal + intercept`
//! to a monthly series, where `ordinal` is the day number of each month's
//! first day, and evaluates it at the target month. No seasonality and no
//! confidence interval: this is a best-effort short-horizon trend.

use chrono::NaiveDate;
use crime_watch_forecast_models::{Forecast, Month, MonthlySeries, TargetPolicy};

/// Minimum number of distinct months needed to fit a trend.
pub const MIN_MONTHS: usize = 2;

/// A fitted least-squares line.
///
/// Stored around the sample means so evaluating far from the origin
/// (ordinals are ~740 000) doesn't lose precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    slope: f64,
    x_mean: f64,
    y_mean: f64,
}

impl LinearTrend {
    /// Fits a line through `(x, y)` points.
    ///
    /// Returns `None` for fewer than [`MIN_MONTHS`] points. A zero-variance
    /// x axis yields a flat line through the mean of `y`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < MIN_MONTHS {
            return None;
        }

        let n = points.len() as f64;
        let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
            let dx = x - x_mean;
            (dx.mul_add(y - y_mean, sxy), dx.mul_add(dx, sxx))
        });

        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };

        Some(Self {
            slope,
            x_mean,
            y_mean,
        })
    }

    /// Evaluates the line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x - self.x_mean, self.y_mean)
    }
}

/// Clamps a raw prediction at zero and truncates it to a whole count.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_count(raw: f64) -> u64 {
    raw.max(0.0).trunc() as u64
}

/// Fits a trend to `series` and predicts the count for `target`.
///
/// Returns `None` when the series has fewer than two distinct months.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fit_and_predict<K>(series: &MonthlySeries<K>, target: Month) -> Option<u64> {
    let points: Vec<(f64, f64)> = series
        .points
        .iter()
        .map(|p| (f64::from(p.month.ordinal()), p.count as f64))
        .collect();

    let trend = LinearTrend::fit(&points)?;
    Some(to_count(trend.predict(f64::from(target.ordinal()))))
}

/// Picks the month to forecast.
///
/// `AfterToday` uses the month after `reference_date`. `AfterLatest` uses
/// the month after `latest_data_month`, falling back to `reference_date`
/// when there is no data.
#[must_use]
pub fn resolve_target_month(
    policy: TargetPolicy,
    reference_date: NaiveDate,
    latest_data_month: Option<Month>,
) -> Month {
    match (policy, latest_data_month) {
        (TargetPolicy::AfterLatest, Some(latest)) => latest.next(),
        _ => Month::containing(reference_date).next(),
    }
}

/// Forecasts every computable series; series with too little history are
/// left out.
#[must_use]
pub fn forecast_all<K: Clone>(series: &[MonthlySeries<K>], target: Month) -> Vec<Forecast<K>> {
    series
        .iter()
        .filter_map(|s| {
            fit_and_predict(s, target).map(|predicted| Forecast {
                key: s.key.clone(),
                target_month: target,
                predicted,
            })
        })
        .collect()
}
