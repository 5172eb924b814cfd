use rand::Rng;
use serde::Serialize;

use crate::constants::MONTH_NAMES;
use crate::daily::daily_comparison;
use crate::error::ClimateError;
use crate::models::{MonthlyAverage, ViewMode, WeatherDataset};
use crate::stats;

/// Extend `dataset` with the fields `mode` needs.
///
/// Annual needs nothing extra. Monthly follows `month` (0 = January) across
/// every year; without a month it behaves like annual. Daily builds the
/// first/middle/last year comparison once and keeps it for the lifetime of
/// the dataset.
pub fn aggregate(
    dataset: &mut WeatherDataset,
    mode: ViewMode,
    month: Option<usize>,
    rng: &mut impl Rng,
) -> Result<(), ClimateError> {
    match mode {
        ViewMode::Annual => Ok(()),
        ViewMode::Monthly => match month {
            Some(month) => aggregate_month(dataset, month),
            None => Ok(()),
        },
        ViewMode::Daily => aggregate_daily(dataset, rng),
    }
}

fn aggregate_month(dataset: &mut WeatherDataset, month: usize) -> Result<(), ClimateError> {
    if month >= 12 {
        return Err(ClimateError::invalid_input(format!(
            "month index {month} is outside 0-11"
        )));
    }

    let Some(monthly) = dataset.monthly() else {
        tracing::warn!("no monthly temperatures, skipping monthly aggregation");
        return Ok(());
    };
    let values: Vec<f64> = monthly.iter().map(|row| row[month]).collect();
    if values.is_empty() {
        return Ok(());
    }

    let name = dataset
        .months
        .get(month)
        .cloned()
        .unwrap_or_else(|| MONTH_NAMES[month].to_string());
    let diff = stats::first_to_last(&values).unwrap_or(0.0);

    let monthly_avg = MonthlyAverage {
        month: name,
        avg: stats::mean(&values),
        min: stats::min(&values).unwrap_or_default(),
        max: stats::max(&values).unwrap_or_default(),
        trend: stats::month_trend(diff, dataset.years.len()),
        values,
    };
    tracing::debug!(month = %monthly_avg.month, trend = %monthly_avg.trend, "aggregated month");

    dataset
        .temperature
        .get_or_insert_with(Default::default)
        .monthly_avg = Some(monthly_avg);
    Ok(())
}

fn aggregate_daily(dataset: &mut WeatherDataset, rng: &mut impl Rng) -> Result<(), ClimateError> {
    if dataset.daily().is_some() {
        return Ok(());
    }

    let monthly = dataset
        .monthly()
        .ok_or(ClimateError::MissingSeries { series: "monthly" })?;
    let bundle = daily_comparison(&dataset.years, monthly, rng)?;

    dataset
        .temperature
        .get_or_insert_with(Default::default)
        .daily = Some(bundle);
    Ok(())
}

/// Average, largest and smallest per-day change between first and last year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncreaseSummary {
    pub average: f64,
    pub largest: f64,
    pub smallest: f64,
}

/// Headline statistics for one view of a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSummary {
    pub mode: ViewMode,
    pub label: String,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub trend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increase: Option<IncreaseSummary>,
}

/// Summarize an aggregated dataset for `mode`.
///
/// Falls back to the annual figures when the view-specific fields are
/// missing. Returns `None` when not even annual statistics exist.
pub fn summarize(dataset: &WeatherDataset, mode: ViewMode) -> Option<ViewSummary> {
    let temperature = dataset.temperature.as_ref()?;

    if mode == ViewMode::Monthly {
        if let Some(monthly) = &temperature.monthly_avg {
            return Some(ViewSummary {
                mode,
                label: format!("{} averages", monthly.month),
                avg: monthly.avg,
                min: monthly.min,
                max: monthly.max,
                trend: monthly.trend.clone(),
                increase: None,
            });
        }
    }

    let increase = match (mode, &temperature.daily) {
        (ViewMode::Daily, Some(daily)) => Some(IncreaseSummary {
            average: daily.average_increase,
            largest: stats::max(&daily.increases)?,
            smallest: stats::min(&daily.increases)?,
        }),
        _ => None,
    };
    let label = match (&increase, &temperature.daily) {
        (Some(_), Some(daily)) => format!(
            "Daily comparison {}",
            daily
                .years
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(" / ")
        ),
        _ => "Annual averages".to_string(),
    };

    Some(ViewSummary {
        mode,
        label,
        avg: temperature.avg?,
        min: temperature.min?,
        max: temperature.max?,
        trend: temperature.trend.clone()?,
        increase,
    })
}
