/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Smallest value, or `None` for an empty slice.
pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

/// Largest value, or `None` for an empty slice.
pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

/// Change between the last and first value, `None` with fewer than two values.
pub fn first_to_last(data: &[f64]) -> Option<f64> {
    match (data.first(), data.last()) {
        (Some(first), Some(last)) if data.len() > 1 => Some(last - first),
        _ => None,
    }
}

/// Trend of a whole series, e.g. `+0.84°C over 50 years`.
pub fn series_trend(values: &[f64], years: &[i32]) -> String {
    let span = match (years.first(), years.last()) {
        (Some(first), Some(last)) => i64::from(*last) - i64::from(*first),
        _ => values.len().saturating_sub(1) as i64,
    };
    match first_to_last(values) {
        Some(diff) => format!("{diff:+.2}\u{00b0}C over {span} years"),
        None => "Insufficient data for trend analysis".to_string(),
    }
}

/// Trend of a single month followed across `year_count` years, e.g. `+1.3°C over 51 years`.
///
/// Only rises carry an explicit sign.
pub fn month_trend(diff: f64, year_count: usize) -> String {
    let sign = if diff > 0.0 { "+" } else { "" };
    format!("{sign}{diff:.1}\u{00b0}C over {year_count} years")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_min_max() {
        let data = [3.0, -1.0, 4.0];
        assert!((mean(&data) - 2.0).abs() < 1e-12);
        assert_eq!(min(&data), Some(-1.0));
        assert_eq!(max(&data), Some(4.0));
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(min(&[]), None);
    }

    #[test]
    fn test_series_trend_uses_year_span() {
        let trend = series_trend(&[20.0, 20.5, 21.25], &[1970, 1995, 2020]);
        assert_eq!(trend, "+1.25\u{00b0}C over 50 years");
        assert_eq!(
            series_trend(&[20.0], &[1970]),
            "Insufficient data for trend analysis"
        );
    }

    #[test]
    fn test_month_trend_signs() {
        assert_eq!(month_trend(1.26, 51), "+1.3\u{00b0}C over 51 years");
        assert_eq!(month_trend(-0.44, 51), "-0.4\u{00b0}C over 51 years");
        assert_eq!(month_trend(0.0, 2), "0.0\u{00b0}C over 2 years");
    }
}
