//! Synthetic datasets used when the backend has nothing for a location.

use std::f64::consts::PI;

use rand::Rng;

use crate::constants::{EPOCH_YEAR, MONTH_NAMES, SAMPLE_YEAR_COUNT};
use crate::models::{
    ExtremeEventsData, Location, MonthlyRow, RainfallData, TemperatureData, WeatherDataset,
};
use crate::stats;

/// Long-term warming applied per year, °C
pub const WARMING_PER_YEAR: f64 = 0.02;

/// Amplitude of the seasonal sine over a year, °C
const SEASONAL_AMPLITUDE: f64 = 5.0;

/// Share of annual rainfall falling in the monsoon
const MONSOON_SHARE: f64 = 0.7;

/// Generate the standard 51-year (1970-2020) sample dataset.
pub fn generate_sample_dataset(location: Location, rng: &mut impl Rng) -> WeatherDataset {
    generate_for_years(location, EPOCH_YEAR, SAMPLE_YEAR_COUNT, rng)
}

/// Generate a sample dataset covering `year_count` years from `first_year`.
pub fn generate_for_years(
    location: Location,
    first_year: i32,
    year_count: usize,
    rng: &mut impl Rng,
) -> WeatherDataset {
    let years: Vec<i32> = (0..year_count).map(|i| first_year + i as i32).collect();

    let base_temp = rng.random_range(20.0..30.0);
    let warming = |year_index: usize| year_index as f64 * WARMING_PER_YEAR;

    let yearly: Vec<f64> = (0..year_count)
        .map(|i| base_temp + warming(i) + rng.random_range(-1.0..1.0))
        .collect();

    let monthly: Vec<MonthlyRow> = (0..year_count)
        .map(|i| {
            let mut row = [0.0; 12];
            for (month, value) in row.iter_mut().enumerate() {
                let seasonal = (month as f64 / 12.0 * 2.0 * PI).sin() * SEASONAL_AMPLITUDE;
                *value = base_temp + seasonal + warming(i) + rng.random_range(-0.75..0.75);
            }
            row
        })
        .collect();

    let base_rainfall = rng.random_range(800.0..1200.0);
    let rainfall: Vec<f64> = (0..year_count)
        .map(|_| base_rainfall + rng.random_range(-100.0..100.0))
        .collect();

    let extreme_events: Vec<u32> = (0..year_count)
        .map(|i| {
            let probability = (0.1 + i as f64 * 0.005).min(1.0);
            if rng.random_bool(probability) {
                rng.random_range(1..=3)
            } else {
                0
            }
        })
        .collect();

    let mean_rainfall = stats::mean(&rainfall);

    tracing::debug!(
        region = %location.region,
        locality = %location.locality,
        base_temp,
        base_rainfall,
        year_count,
        "generated sample dataset"
    );

    WeatherDataset {
        location,
        years,
        months: MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
        temperature: Some(TemperatureData {
            avg: Some(stats::mean(&yearly)),
            min: stats::min(&yearly),
            max: stats::max(&yearly),
            trend: Some("+1.2\u{00b0}C over 50 years".to_string()),
            yearly: Some(yearly),
            monthly: Some(monthly),
            daily: None,
            monthly_avg: None,
        }),
        rainfall: Some(RainfallData {
            annual: Some(mean_rainfall.round()),
            monsoon: Some((mean_rainfall * MONSOON_SHARE).round()),
            non_monsoon: Some((mean_rainfall * (1.0 - MONSOON_SHARE)).round()),
            trend: Some("Increasing variability".to_string()),
            yearly: Some(rainfall),
        }),
        extreme_events: Some(ExtremeEventsData {
            total: Some(extreme_events.iter().sum()),
            yearly: Some(extreme_events),
            heatwaves: Some("Increasing frequency".to_string()),
            heavy_rain: Some("More intense".to_string()),
            droughts: Some("Longer duration".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn location() -> Location {
        Location::new("Rajasthan", "JODHPUR")
    }

    #[test]
    fn test_standard_range_is_1970_to_2020() {
        let dataset = generate_sample_dataset(location(), &mut StdRng::seed_from_u64(1));
        assert_eq!(dataset.years.len(), 51);
        assert_eq!(dataset.years[0], 1970);
        assert_eq!(dataset.years[50], 2020);
        assert_eq!(dataset.months.len(), 12);
        assert_eq!(dataset.months[0], "Jan");
    }

    #[test]
    fn test_shapes_follow_year_count() {
        let mut rng = StdRng::seed_from_u64(5);
        for n in [2, 3, 10, 51] {
            let dataset = generate_for_years(location(), 1990, n, &mut rng);
            assert_eq!(dataset.years.len(), n);
            assert_eq!(dataset.yearly().unwrap().len(), n);
            assert_eq!(dataset.monthly().unwrap().len(), n);
            assert_eq!(dataset.rainfall.as_ref().unwrap().yearly.as_ref().unwrap().len(), n);
        }
    }

    #[test]
    fn test_values_stay_within_generator_bounds() {
        let dataset = generate_sample_dataset(location(), &mut StdRng::seed_from_u64(9));
        let temperature = dataset.temperature.as_ref().unwrap();
        // base 20..30, warming up to 1.0, noise +/-1
        for &t in temperature.yearly.as_ref().unwrap() {
            assert!((19.0..32.0).contains(&t));
        }
        let avg = temperature.avg.unwrap();
        assert!(temperature.min.unwrap() <= avg && avg <= temperature.max.unwrap());

        let events = dataset.extreme_events.as_ref().unwrap();
        let yearly = events.yearly.as_ref().unwrap();
        assert!(yearly.iter().all(|&count| count <= 3));
        assert_eq!(events.total, Some(yearly.iter().sum()));
    }

    #[test]
    fn test_extreme_events_become_more_frequent() {
        let mut rng = StdRng::seed_from_u64(5);
        let (mut early, mut late) = (0, 0);
        for _ in 0..200 {
            let dataset = generate_sample_dataset(location(), &mut rng);
            let yearly = dataset.extreme_events.unwrap().yearly.unwrap();
            early += yearly[..10].iter().filter(|&&count| count > 0).count();
            late += yearly[41..].iter().filter(|&&count| count > 0).count();
        }
        // probability climbs from about 0.12 to 0.33 between the two decades
        assert!(late > early * 2, "early {early}, late {late}");
    }

    #[test]
    fn test_monthly_rows_follow_one_seasonal_cycle() {
        let dataset = generate_sample_dataset(location(), &mut StdRng::seed_from_u64(21));
        let monthly = dataset.monthly().unwrap();
        let mean_of = |month: usize| stats::mean(&monthly.iter().map(|r| r[month]).collect::<Vec<_>>());
        // sine peaks at index 3 and bottoms out at index 9
        assert!(mean_of(3) - mean_of(9) > 8.0);
    }

    #[test]
    fn test_rainfall_split_adds_up() {
        let dataset = generate_sample_dataset(location(), &mut StdRng::seed_from_u64(2));
        let rainfall = dataset.rainfall.unwrap();
        let annual = rainfall.annual.unwrap();
        let split = rainfall.monsoon.unwrap() + rainfall.non_monsoon.unwrap();
        assert!((annual - split).abs() <= 1.0);
        assert!((700.0..=1300.0).contains(&annual));
    }
}
