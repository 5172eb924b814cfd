use crate::aggregate::ViewSummary;
use crate::charts::Camera;
use crate::constants::REGIONS;
use crate::models::{ViewMode, WeatherDataset};

fn view_name(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Annual => "annual",
        ViewMode::Monthly => "monthly",
        ViewMode::Daily => "daily",
    }
}

fn celsius(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}\u{00b0}C"),
        None => "n/a".to_string(),
    }
}

/// Formats the region/locality catalogue into a human-readable string
pub fn format_regions() -> String {
    let mut output = String::from("Available Regions:\n\n");
    for (region, localities) in REGIONS {
        output.push_str(&format!("{}:\n", region));
        for locality in *localities {
            output.push_str(&format!("  - {}\n", locality));
        }
    }
    output
}

/// Formats the headline statistics of one view into a human-readable string
pub fn format_summary(dataset: &WeatherDataset, summary: &ViewSummary) -> String {
    let location = &dataset.location;
    let period = match (dataset.years.first(), dataset.years.last()) {
        (Some(first), Some(last)) => format!("{}-Year Analysis ({}-{})", last - first, first, last),
        _ => "No yearly data".to_string(),
    };

    let mut output = format!(
        "Climate Trends: {}, {}\n{}\nView: {}\n\n",
        location.locality, location.region, period, summary.label
    );
    output.push_str(&format!(
        "  Average Temperature: {}\n  Range: {} to {}\n  Trend: {}\n",
        celsius(Some(summary.avg)),
        celsius(Some(summary.min)),
        celsius(Some(summary.max)),
        summary.trend
    ));

    if let Some(increase) = &summary.increase {
        output.push_str(&format!(
            "  Average Daily Increase: {:+.1}\u{00b0}C\n  Largest Daily Increase: {:+.1}\u{00b0}C\n  Smallest Daily Increase: {:+.1}\u{00b0}C\n",
            increase.average, increase.largest, increase.smallest
        ));
    }

    if let Some(rainfall) = &dataset.rainfall {
        if let Some(annual) = rainfall.annual {
            output.push_str(&format!("  Annual Rainfall: {:.0} mm\n", annual));
        }
        if let (Some(monsoon), Some(non_monsoon)) = (rainfall.monsoon, rainfall.non_monsoon) {
            output.push_str(&format!(
                "  Monsoon / Non-monsoon: {:.0} mm / {:.0} mm\n",
                monsoon, non_monsoon
            ));
        }
    }
    if let Some(total) = dataset.extreme_events.as_ref().and_then(|e| e.total) {
        output.push_str(&format!("  Extreme Events: {}\n", total));
    }
    output
}

/// Minimal text shown when the charts cannot be drawn
pub fn format_fallback_summary(dataset: &WeatherDataset, mode: ViewMode) -> String {
    let temperature = dataset.temperature.as_ref();

    format!(
        "Weather Data for {}, {}\nData type: {}\nAverage temperature: {}\nTemperature trend: {}\nTemperature range: {} to {}\n",
        dataset.location.locality,
        dataset.location.region,
        view_name(mode),
        celsius(temperature.and_then(|t| t.avg)),
        temperature.and_then(|t| t.trend.as_deref()).unwrap_or("n/a"),
        celsius(temperature.and_then(|t| t.min)),
        celsius(temperature.and_then(|t| t.max)),
    )
}

/// Formats a camera position into a human-readable string
pub fn format_camera(camera: &Camera, rotating: bool) -> String {
    format!(
        "Camera eye: ({:.2}, {:.2}, {:.2})\nAuto-rotation: {}\n",
        camera.eye.x,
        camera.eye.y,
        camera.eye.z,
        if rotating { "ON" } else { "OFF" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, summarize};
    use crate::models::Location;
    use crate::sample::generate_sample_dataset;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_regions_list_every_locality() {
        let text = format_regions();
        assert!(text.contains("Delhi (NCT):\n  - SAFDARJUNG (New Delhi)\n"));
        assert!(text.contains("  - MINICOY"));
    }

    #[test]
    fn test_daily_summary_lists_increases() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut dataset = generate_sample_dataset(Location::new("Bihar", "PATNA"), &mut rng);
        aggregate(&mut dataset, ViewMode::Daily, None, &mut rng).unwrap();
        let summary = summarize(&dataset, ViewMode::Daily).unwrap();

        let text = format_summary(&dataset, &summary);
        assert!(text.starts_with("Climate Trends: PATNA, Bihar\n50-Year Analysis (1970-2020)"));
        assert!(text.contains("Largest Daily Increase"));
        assert!(text.contains("Annual Rainfall"));
    }

    #[test]
    fn test_fallback_without_statistics() {
        let dataset = WeatherDataset::new(Location::new("Goa", "GOA or PANJIM"));
        let text = format_fallback_summary(&dataset, ViewMode::Monthly);
        assert!(text.contains("Data type: monthly"));
        assert!(text.contains("Average temperature: n/a"));
    }
}
