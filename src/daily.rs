//! Monthly to daily temperature synthesis.
//!
//! A row of twelve monthly means becomes 365 daily values: each day starts
//! from its month's mean, days near a month boundary are blended with the
//! neighbouring month, and a bounded uniform jitter is added on top. February
//! always has 28 days.

use rand::Rng;

use crate::constants::{DAYS_IN_MONTH, DAYS_PER_YEAR, EPOCH_YEAR, TRANSITION_WINDOW_DAYS};
use crate::error::ClimateError;
use crate::models::{DailyComparison, MonthlyRow};
use crate::stats;

/// Half-width of the jitter band for a month (0 = January).
pub fn variation_factor(month: usize) -> f64 {
    match month {
        0 | 6 => 0.8,
        1 | 5 | 7 | 11 => 0.6,
        _ => 0.4,
    }
}

/// Weight of the neighbouring month for a day `offset` days away from a
/// month boundary (0 = the day touching the boundary).
///
/// Weights fall linearly from just under one half at the boundary to zero at
/// the window edge, so the two days either side of a boundary sit
/// symmetrically around the midpoint of the two monthly means.
fn neighbour_weight(offset: usize) -> f64 {
    let window = TRANSITION_WINDOW_DAYS as f64;
    (window - offset as f64 - 0.5) / (2.0 * window)
}

/// Noise-free daily value for `day` (0-based) of `month`.
fn blended_base(row: &MonthlyRow, month: usize, day: usize) -> f64 {
    let current = row[month];
    let days = DAYS_IN_MONTH[month];

    if day < TRANSITION_WINDOW_DAYS && month > 0 {
        let w = neighbour_weight(day);
        row[month - 1] * w + current * (1.0 - w)
    } else if day >= days - TRANSITION_WINDOW_DAYS && month < 11 {
        let w = neighbour_weight(days - 1 - day);
        row[month + 1] * w + current * (1.0 - w)
    } else {
        current
    }
}

/// Expand a monthly row into exactly 365 daily temperatures.
pub fn synthesize_daily(row: &MonthlyRow, rng: &mut impl Rng) -> Vec<f64> {
    let mut daily = Vec::with_capacity(DAYS_PER_YEAR);

    for (month, &days) in DAYS_IN_MONTH.iter().enumerate() {
        let factor = variation_factor(month);
        for day in 0..days {
            let jitter = (rng.random::<f64>() - 0.5) * factor * 2.0;
            daily.push(blended_base(row, month, day) + jitter);
        }
    }

    daily
}

/// Build the first/middle/last year comparison from a monthly grid.
///
/// `years` labels the rows; when it is shorter than `monthly` the labels
/// fall back to consecutive years from 1970.
pub fn daily_comparison(
    years: &[i32],
    monthly: &[MonthlyRow],
    rng: &mut impl Rng,
) -> Result<DailyComparison, ClimateError> {
    if monthly.is_empty() {
        return Err(ClimateError::MissingSeries { series: "monthly" });
    }

    let n = monthly.len();
    let picks = [0, n / 2, n - 1];
    let label = |index: usize| {
        years
            .get(index)
            .copied()
            .unwrap_or(EPOCH_YEAR + index as i32)
    };

    let temperatures: Vec<Vec<f64>> = picks
        .iter()
        .map(|&index| synthesize_daily(&monthly[index], rng))
        .collect();

    let increases: Vec<f64> = temperatures[2]
        .iter()
        .zip(&temperatures[0])
        .map(|(last, first)| last - first)
        .collect();
    let average_increase = stats::mean(&increases);

    tracing::debug!(
        years = ?picks.map(label),
        average_increase,
        "synthesized daily comparison"
    );

    Ok(DailyComparison {
        years: picks.iter().map(|&index| label(index)).collect(),
        temperatures,
        increases,
        average_increase,
        day_labels: (1..=DAYS_PER_YEAR as u32).collect(),
    })
}
