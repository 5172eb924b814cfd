//! Fills the gaps in a backend payload.
//!
//! Normalization only ever adds: a field that is already present is left
//! exactly as it was, which makes running it twice a no-op.

use crate::constants::{EPOCH_YEAR, MONTH_NAMES, SEASONAL_PATTERN};
use crate::models::{MonthlyRow, WeatherDataset};
use crate::stats;

/// Give every year the same seasonal shape, shifted to that year's average.
pub fn derive_monthly_from_yearly(yearly: &[f64]) -> Vec<MonthlyRow> {
    yearly
        .iter()
        .map(|&avg| SEASONAL_PATTERN.map(|offset| avg + offset))
        .collect()
}

/// Yearly averages as the mean of each monthly row.
pub fn derive_yearly_from_monthly(monthly: &[MonthlyRow]) -> Vec<f64> {
    monthly.iter().map(|row| stats::mean(row)).collect()
}

/// Fill the missing parts of `dataset` in place.
pub fn normalize(dataset: &mut WeatherDataset) {
    let temperature = dataset.temperature.get_or_insert_with(Default::default);

    if temperature.monthly.is_none() {
        if let Some(yearly) = &temperature.yearly {
            tracing::debug!("deriving monthly temperatures from yearly averages");
            temperature.monthly = Some(derive_monthly_from_yearly(yearly));
        }
    }
    if temperature.yearly.is_none() {
        if let Some(monthly) = &temperature.monthly {
            tracing::debug!("deriving yearly averages from monthly temperatures");
            temperature.yearly = Some(derive_yearly_from_monthly(monthly));
        }
    }

    if dataset.years.is_empty() {
        let n = temperature
            .yearly
            .as_ref()
            .map_or(0, Vec::len)
            .max(temperature.monthly.as_ref().map_or(0, Vec::len));
        dataset.years = (0..n).map(|i| EPOCH_YEAR + i as i32).collect();
    }

    if let Some(yearly) = temperature.yearly.as_deref() {
        if temperature.avg.is_none() && !yearly.is_empty() {
            temperature.avg = Some(stats::mean(yearly));
        }
        if temperature.min.is_none() {
            temperature.min = stats::min(yearly);
        }
        if temperature.max.is_none() {
            temperature.max = stats::max(yearly);
        }
        if temperature.trend.is_none() {
            temperature.trend = Some(stats::series_trend(yearly, &dataset.years));
        }
    }

    if dataset.months.is_empty() {
        dataset.months = MONTH_NAMES.iter().map(|m| m.to_string()).collect();
    }

    dataset.rainfall.get_or_insert_with(Default::default);
    dataset.extreme_events.get_or_insert_with(Default::default);
}
