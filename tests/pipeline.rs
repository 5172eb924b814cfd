//! End-to-end checks of fetch, normalize, aggregate and render

use std::time::Duration;

use mcp_climate_trends::constants::{
    DAILY_CHART_CONTAINER, DAYS_PER_YEAR, SURFACE_CHART_CONTAINER, TREND_CHART_CONTAINER,
};
use mcp_climate_trends::daily::{synthesize_daily, variation_factor};
use mcp_climate_trends::models::{MonthlyRow, TemperatureData};
use mcp_climate_trends::{
    aggregate, generate_sample_dataset, normalize, render, summarize, ClimateError, DataFetcher,
    HttpClimateSource, Location, PayloadSink, RenderOutcome, ViewMode, WeatherDataset,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

fn delhi() -> Location {
    Location::new("Delhi (NCT)", "SAFDARJUNG (New Delhi)")
}

async fn fetch_unreachable(seed: u64) -> WeatherDataset {
    let source = HttpClimateSource::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let fetcher = DataFetcher::new(source);
    let mut rng = StdRng::seed_from_u64(seed);
    fetcher.fetch(&delhi(), &mut rng).await
}

#[tokio::test]
async fn test_unreachable_backend_yields_sample() {
    let dataset = fetch_unreachable(11).await;

    assert_eq!(dataset.location, delhi());
    assert_eq!(dataset.years.first(), Some(&1970));
    assert_eq!(dataset.years.last(), Some(&2020));
    assert_eq!(dataset.yearly().unwrap().len(), 51);
    assert_eq!(dataset.monthly().unwrap().len(), 51);
    assert_eq!(dataset.months.len(), 12);
    assert!(dataset.rainfall.is_some());
    assert!(dataset.extreme_events.is_some());
}

#[rstest]
#[case(ViewMode::Annual, None, "Annual averages")]
#[case(ViewMode::Monthly, Some(0), "Jan averages")]
#[case(ViewMode::Monthly, None, "Annual averages")]
#[case(ViewMode::Daily, None, "Daily comparison 1970 / 1995 / 2020")]
#[tokio::test]
async fn test_views_over_generated_data(
    #[case] mode: ViewMode,
    #[case] month: Option<usize>,
    #[case] label: &str,
) {
    let mut dataset = fetch_unreachable(12).await;
    let mut rng = StdRng::seed_from_u64(13);

    aggregate(&mut dataset, mode, month, &mut rng).unwrap();
    let summary = summarize(&dataset, mode).unwrap();
    assert_eq!(summary.label, label);
    assert!(summary.min <= summary.avg && summary.avg <= summary.max);

    match (mode, month) {
        (ViewMode::Monthly, Some(_)) => {
            let monthly = dataset.monthly_avg().unwrap();
            assert_eq!(monthly.month, "Jan");
            assert_eq!(monthly.values.len(), dataset.years.len());
        }
        (ViewMode::Daily, _) => {
            let daily = dataset.daily().unwrap();
            assert_eq!(daily.years, vec![1970, 1995, 2020]);
            assert!(daily.temperatures.iter().all(|t| t.len() == DAYS_PER_YEAR));
            assert_eq!(daily.increases.len(), DAYS_PER_YEAR);
            assert!(summary.increase.is_some());
        }
        _ => {
            assert!(dataset.monthly_avg().is_none());
            let trend = dataset.temperature.as_ref().unwrap().trend.as_deref();
            assert!(trend.is_some_and(|t| !t.is_empty()));
            assert!(!summary.trend.is_empty());
        }
    }
}

#[test]
fn test_out_of_range_month_rejected() {
    let mut rng = StdRng::seed_from_u64(14);
    let mut dataset = generate_sample_dataset(delhi(), &mut rng);

    let err = aggregate(&mut dataset, ViewMode::Monthly, Some(12), &mut rng).unwrap_err();
    assert!(matches!(err, ClimateError::InvalidInput { .. }));
}

#[test]
fn test_daily_bundle_is_computed_once() {
    let mut rng = StdRng::seed_from_u64(15);
    let mut dataset = generate_sample_dataset(delhi(), &mut rng);

    aggregate(&mut dataset, ViewMode::Daily, None, &mut rng).unwrap();
    let first = dataset.daily().cloned().unwrap();
    aggregate(&mut dataset, ViewMode::Daily, None, &mut rng).unwrap();
    assert_eq!(dataset.daily(), Some(&first));
}

#[test]
fn test_yearly_only_payload_normalizes_once() {
    let mut dataset = WeatherDataset::new(delhi());
    dataset.temperature = Some(TemperatureData {
        yearly: Some(vec![24.0, 24.5, 25.0]),
        ..Default::default()
    });

    normalize(&mut dataset);
    let once = dataset.clone();
    normalize(&mut dataset);

    assert_eq!(dataset, once);
    assert_eq!(dataset.years, vec![1970, 1971, 1972]);
    let jan: Vec<f64> = dataset.monthly().unwrap().iter().map(|r| r[0]).collect();
    assert_eq!(jan, vec![21.0, 21.5, 22.0]);
}

#[test]
fn test_synthesized_days_stay_continuous() {
    let row: MonthlyRow = [
        14.0, 17.5, 23.0, 29.0, 33.5, 34.0, 31.0, 30.0, 29.0, 26.0, 20.0, 15.5,
    ];
    let largest_step = row
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(0.0, f64::max);
    let noise = 2.0 * variation_factor(0);

    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let daily = synthesize_daily(&row, &mut rng);
        assert_eq!(daily.len(), DAYS_PER_YEAR);

        for pair in daily.windows(2) {
            let step = (pair[1] - pair[0]).abs();
            assert!(
                step <= noise + largest_step / 10.0 + 1e-9,
                "step {step} too large"
            );
        }
    }
}

#[tokio::test]
async fn test_render_and_replace_charts() {
    let mut dataset = fetch_unreachable(16).await;
    let mut rng = StdRng::seed_from_u64(17);
    let mut sink = PayloadSink::standard();

    let RenderOutcome::Rendered(mut annual) =
        render(&mut dataset, ViewMode::Annual, &mut sink, &mut rng).unwrap()
    else {
        panic!("expected charts");
    };
    let payloads = sink.snapshot();
    assert_eq!(payloads.len(), 3);
    assert_eq!(payloads[SURFACE_CHART_CONTAINER]["x"][0], 1970);
    assert_eq!(
        payloads[TREND_CHART_CONTAINER]["title"],
        "Temperature Trends (1970-2020) - SAFDARJUNG (New Delhi), Delhi (NCT)"
    );

    annual.teardown();
    assert!(sink.snapshot().is_empty());

    let RenderOutcome::Rendered(daily) =
        render(&mut dataset, ViewMode::Daily, &mut sink, &mut rng).unwrap()
    else {
        panic!("expected charts");
    };
    assert_eq!(daily.containers(), vec![DAILY_CHART_CONTAINER]);
    assert_eq!(
        sink.snapshot().keys().collect::<Vec<_>>(),
        vec![DAILY_CHART_CONTAINER]
    );
}
