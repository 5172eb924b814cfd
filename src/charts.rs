//! Chart payloads handed to the renderers.
//!
//! Each builder turns an aggregated dataset into the data series, labels and
//! options one renderer needs. Drawing them is up to the sink.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ClimateError;
use crate::models::{CameraPreset, MonthlyRow, WeatherDataset};
use crate::stats;

const TEMPERATURE_BORDER: &str = "rgba(255, 99, 132, 1)";
const TEMPERATURE_GRADIENT: [&str; 2] = ["rgba(255, 99, 132, 0.2)", "rgba(255, 99, 132, 0.8)"];
const DAILY_COLORS: [&str; 3] = [
    "rgba(0, 119, 182, 0.8)",
    "rgba(255, 193, 7, 0.8)",
    "rgba(220, 53, 69, 0.8)",
];
const INCREASE_COLOR: &str = "rgba(76, 175, 80, 0.8)";
const HIGHLIGHT_COLOR: &str = "#e63946";

/// Blue (cold) to red (hot)
const SURFACE_COLORSCALE: [(f64, &str); 6] = [
    (0.0, "rgb(0, 50, 180)"),
    (0.2, "rgb(30, 144, 255)"),
    (0.4, "rgb(0, 255, 255)"),
    (0.6, "rgb(255, 255, 0)"),
    (0.8, "rgb(255, 128, 0)"),
    (1.0, "rgb(200, 0, 0)"),
];

pub const ROTATION_INTERVAL: Duration = Duration::from_millis(100);
pub const ROTATION_STEP_DEGREES: f64 = 0.3;
const ROTATION_RADIUS: f64 = 2.0;
const ROTATION_HEIGHT: f64 = 0.8;

fn year_span(years: &[i32]) -> String {
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => "no years".to_string(),
    }
}

// ============================================================================
// Trend line
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLineChart {
    pub title: String,
    pub label: String,
    pub x: Vec<i32>,
    pub y: Vec<f64>,
    pub border_color: &'static str,
    pub fill_gradient: [&'static str; 2],
    pub y_axis_title: String,
}

impl TrendLineChart {
    pub fn from_dataset(dataset: &WeatherDataset) -> Result<Self, ClimateError> {
        let yearly = dataset
            .yearly()
            .ok_or(ClimateError::MissingSeries { series: "yearly" })?;

        Ok(Self {
            title: format!(
                "Temperature Trends ({}) - {}, {}",
                year_span(&dataset.years),
                dataset.location.locality,
                dataset.location.region
            ),
            label: "Average Temperature (\u{00b0}C)".to_string(),
            x: dataset.years.clone(),
            y: yearly.to_vec(),
            border_color: TEMPERATURE_BORDER,
            fill_gradient: TEMPERATURE_GRADIENT,
            y_axis_title: "Temperature (\u{00b0}C)".to_string(),
        })
    }
}

// ============================================================================
// 3D surface
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub fn preset(preset: CameraPreset) -> Self {
        let center = Vec3::new(0.0, 0.0, 0.0);
        let z_up = Vec3::new(0.0, 0.0, 1.0);
        match preset {
            CameraPreset::Default => Self {
                eye: Vec3::new(1.5, -1.5, 0.8),
                center,
                up: z_up,
            },
            CameraPreset::Top => Self {
                eye: Vec3::new(0.0, 0.0, 2.5),
                center,
                up: Vec3::new(0.0, 1.0, 0.0),
            },
            CameraPreset::Side => Self {
                eye: Vec3::new(2.5, 0.0, 0.0),
                center,
                up: z_up,
            },
            CameraPreset::Front => Self {
                eye: Vec3::new(0.0, -2.5, 0.0),
                center,
                up: z_up,
            },
        }
    }

    /// Camera circling the surface at `angle` degrees
    pub fn orbit(angle: f64) -> Self {
        let radians = angle.to_radians();
        Self {
            eye: Vec3::new(
                ROTATION_RADIUS * radians.cos(),
                ROTATION_RADIUS * radians.sin(),
                ROTATION_HEIGHT,
            ),
            ..Self::preset(CameraPreset::Default)
        }
    }
}

/// One year of the surface drawn as a 3D line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightTrace {
    pub name: String,
    pub x: Vec<i32>,
    pub y: Vec<usize>,
    pub z: Vec<f64>,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnnotation {
    pub title: String,
    pub change: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceChart {
    pub x: Vec<i32>,
    pub y: Vec<String>,
    pub z: Vec<MonthlyRow>,
    pub cmin: f64,
    pub cmax: f64,
    pub colorscale: Vec<(f64, &'static str)>,
    pub camera: Camera,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightTrace>,
    pub annotation: TrendAnnotation,
}

impl SurfaceChart {
    pub fn from_dataset(dataset: &WeatherDataset) -> Result<Self, ClimateError> {
        let monthly = dataset
            .monthly()
            .filter(|rows| !rows.is_empty())
            .ok_or(ClimateError::MissingSeries { series: "monthly" })?;

        let flat: Vec<f64> = monthly.iter().flatten().copied().collect();
        let cmin = stats::min(&flat).unwrap_or_default().floor() - 1.0;
        let cmax = stats::max(&flat).unwrap_or_default().ceil() + 1.0;

        let first_mean = stats::mean(&monthly[0]);
        let last_mean = stats::mean(&monthly[monthly.len() - 1]);
        let change = last_mean - first_mean;
        let sign = if change > 0.0 { "+" } else { "" };

        Ok(Self {
            x: dataset.years.clone(),
            y: dataset.months.clone(),
            z: monthly.to_vec(),
            cmin,
            cmax,
            colorscale: SURFACE_COLORSCALE.to_vec(),
            camera: Camera::preset(CameraPreset::Default),
            highlight: None,
            annotation: TrendAnnotation {
                title: format!("Temperature Change ({})", year_span(&dataset.years)),
                change,
                text: format!("{sign}{change:.1}\u{00b0}C"),
            },
        })
    }

    /// Overlay `year` as a line, replacing any previous highlight.
    ///
    /// Returns false and leaves nothing highlighted when the year is not on the surface.
    pub fn highlight_year(&mut self, year: i32) -> bool {
        self.highlight = None;
        let Some(index) = self.x.iter().position(|&y| y == year) else {
            return false;
        };
        let Some(row) = self.z.get(index) else {
            return false;
        };

        self.highlight = Some(HighlightTrace {
            name: format!("Year {year}"),
            x: vec![year; 12],
            y: (0..12).collect(),
            z: row.to_vec(),
            color: HIGHLIGHT_COLOR,
        });
        true
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }
}

/// Interactive state of a drawn surface: camera, rotation and highlight
pub struct SurfaceView {
    chart: SurfaceChart,
    preset: CameraPreset,
    camera: Arc<watch::Sender<Camera>>,
    rotation: Option<JoinHandle<()>>,
}

impl SurfaceView {
    /// Wrap `chart`; rotation starts immediately when `rotate` is set.
    ///
    /// Rotation spawns a tokio task, so it needs a running runtime.
    pub fn new(chart: SurfaceChart, rotate: bool) -> Self {
        let (camera, _) = watch::channel(chart.camera);
        let mut view = Self {
            chart,
            preset: CameraPreset::Default,
            camera: Arc::new(camera),
            rotation: None,
        };
        if rotate {
            view.start_rotation();
        }
        view
    }

    pub fn chart(&self) -> &SurfaceChart {
        &self.chart
    }

    pub fn preset(&self) -> CameraPreset {
        self.preset
    }

    /// Current camera, following rotation when it is running
    pub fn camera(&self) -> Camera {
        *self.camera.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Camera> {
        self.camera.subscribe()
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_some()
    }

    pub fn start_rotation(&mut self) {
        self.stop_rotation();
        self.preset = CameraPreset::Default;

        let camera = Arc::clone(&self.camera);
        self.rotation = Some(tokio::spawn(async move {
            let mut angle = 0.0_f64;
            let mut ticker = tokio::time::interval(ROTATION_INTERVAL);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                angle = (angle + ROTATION_STEP_DEGREES) % 360.0;
                camera.send_replace(Camera::orbit(angle));
            }
        }));
    }

    pub fn stop_rotation(&mut self) {
        if let Some(task) = self.rotation.take() {
            task.abort();
        }
    }

    /// Returns whether rotation is running afterwards.
    pub fn toggle_rotation(&mut self) -> bool {
        if self.is_rotating() {
            self.stop_rotation();
        } else {
            self.start_rotation();
        }
        self.is_rotating()
    }

    /// Move to a fixed camera; any preset but the default stops rotation.
    pub fn set_preset(&mut self, preset: CameraPreset) -> Camera {
        if preset != CameraPreset::Default {
            self.stop_rotation();
        }
        self.preset = preset;
        let camera = Camera::preset(preset);
        self.chart.camera = camera;
        self.camera.send_replace(camera);
        camera
    }

    /// Highlight `year`, or clear the highlight with `None`.
    pub fn highlight(&mut self, year: Option<i32>) -> Option<&HighlightTrace> {
        match year {
            Some(year) => {
                if !self.chart.highlight_year(year) {
                    tracing::debug!(year, "year not on surface, highlight cleared");
                }
            }
            None => self.chart.clear_highlight(),
        }
        self.chart.highlight.as_ref()
    }
}

impl Drop for SurfaceView {
    fn drop(&mut self) {
        self.stop_rotation();
    }
}

// ============================================================================
// Daily comparison
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineTrace {
    pub name: String,
    pub x: Vec<u32>,
    pub y: Vec<f64>,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyComparisonChart {
    pub traces: Vec<LineTrace>,
    pub average_increase: f64,
    pub annotation: String,
}

impl DailyComparisonChart {
    pub fn from_dataset(dataset: &WeatherDataset) -> Result<Self, ClimateError> {
        let daily = dataset
            .daily()
            .ok_or(ClimateError::MissingSeries { series: "daily" })?;
        let days = |len: usize| (1..=len as u32).collect::<Vec<_>>();

        let mut traces: Vec<LineTrace> = daily
            .years
            .iter()
            .zip(&daily.temperatures)
            .zip(DAILY_COLORS)
            .map(|((year, temps), color)| LineTrace {
                name: year.to_string(),
                x: days(temps.len()),
                y: temps.clone(),
                color,
                dash: None,
                yaxis: None,
            })
            .collect();

        traces.push(LineTrace {
            name: format!("Daily Increase ({})", year_span(&daily.years)),
            x: days(daily.increases.len()),
            y: daily.increases.clone(),
            color: INCREASE_COLOR,
            dash: Some("dot"),
            yaxis: Some("y2"),
        });

        Ok(Self {
            traces,
            average_increase: daily.average_increase,
            annotation: format!(
                "Average increase: {:+.2}\u{00b0}C",
                daily.average_increase
            ),
        })
    }
}

/// Any chart payload, tagged by renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Chart {
    TrendLine(TrendLineChart),
    Surface(SurfaceChart),
    DailyComparison(DailyComparisonChart),
}
