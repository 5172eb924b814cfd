//! Render cycle: hand chart payloads to sinks and own what they create.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use rand::Rng;
use serde_json::Value;

use crate::aggregate::aggregate;
use crate::charts::{Chart, DailyComparisonChart, SurfaceChart, SurfaceView, TrendLineChart};
use crate::constants::{DAILY_CHART_CONTAINER, SURFACE_CHART_CONTAINER, TREND_CHART_CONTAINER};
use crate::error::ClimateError;
use crate::formatters::format_fallback_summary;
use crate::models::{ViewMode, WeatherDataset};

/// Something drawn by a sink that must be released before the next render
pub trait ChartHandle: Send {
    fn container(&self) -> &str;
    fn teardown(&mut self);
}

/// Renderer that accepts a chart payload for a named container
pub trait ChartSink: Send {
    fn has_container(&self, container: &str) -> bool;
    fn draw(
        &mut self,
        container: &str,
        chart: &Chart,
    ) -> Result<Box<dyn ChartHandle>, ClimateError>;
}

/// Everything created by one render cycle
#[derive(Default)]
pub struct RenderSession {
    handles: Vec<Box<dyn ChartHandle>>,
    surface: Option<SurfaceView>,
}

impl RenderSession {
    pub fn containers(&self) -> Vec<&str> {
        self.handles.iter().map(|h| h.container()).collect()
    }

    pub fn surface(&self) -> Option<&SurfaceView> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut SurfaceView> {
        self.surface.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty() && self.surface.is_none()
    }

    /// Release every chart and stop surface rotation. Safe to call twice.
    pub fn teardown(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.stop_rotation();
        }
        for mut handle in self.handles.drain(..) {
            tracing::debug!(container = handle.container(), "tearing down chart");
            handle.teardown();
        }
    }
}

impl Drop for RenderSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Result of a render cycle
pub enum RenderOutcome {
    Rendered(RenderSession),
    /// A sink failed; the text stands in for the charts
    Fallback(String),
}

/// Containers a render cycle expects, in drawing order
pub fn required_containers(mode: ViewMode) -> &'static [&'static str] {
    match mode {
        ViewMode::Daily => &[DAILY_CHART_CONTAINER],
        ViewMode::Annual | ViewMode::Monthly => &[
            DAILY_CHART_CONTAINER,
            SURFACE_CHART_CONTAINER,
            TREND_CHART_CONTAINER,
        ],
    }
}

/// Draw the charts for `mode` on `sink`.
///
/// The daily comparison is derived first when missing and stays on the
/// dataset. A missing container is an error; a failing chart tears down
/// what was drawn and yields the textual fallback instead.
pub fn render(
    dataset: &mut WeatherDataset,
    mode: ViewMode,
    sink: &mut dyn ChartSink,
    rng: &mut impl Rng,
) -> Result<RenderOutcome, ClimateError> {
    for container in [
        DAILY_CHART_CONTAINER,
        SURFACE_CHART_CONTAINER,
        TREND_CHART_CONTAINER,
    ] {
        if !sink.has_container(container) {
            tracing::error!("Chart container {} not found", container);
            return Err(ClimateError::RenderTargetMissing {
                container: container.to_string(),
            });
        }
    }

    let mut session = RenderSession::default();
    match draw_all(dataset, mode, sink, rng, &mut session) {
        Ok(()) => Ok(RenderOutcome::Rendered(session)),
        Err(e) => {
            tracing::error!("Error rendering charts: {}", e);
            session.teardown();
            Ok(RenderOutcome::Fallback(format_fallback_summary(dataset, mode)))
        }
    }
}

fn draw_all(
    dataset: &mut WeatherDataset,
    mode: ViewMode,
    sink: &mut dyn ChartSink,
    rng: &mut impl Rng,
    session: &mut RenderSession,
) -> Result<(), ClimateError> {
    if dataset.daily().is_none() {
        aggregate(dataset, ViewMode::Daily, None, rng)?;
    }

    for &container in required_containers(mode) {
        let chart = match container {
            DAILY_CHART_CONTAINER => {
                Chart::DailyComparison(DailyComparisonChart::from_dataset(dataset)?)
            }
            SURFACE_CHART_CONTAINER => Chart::Surface(SurfaceChart::from_dataset(dataset)?),
            _ => Chart::TrendLine(TrendLineChart::from_dataset(dataset)?),
        };
        let handle = sink.draw(container, &chart)?;
        session.handles.push(handle);

        if let Chart::Surface(surface) = chart {
            session.surface = Some(SurfaceView::new(surface, true));
        }
    }
    Ok(())
}

type PayloadStore = Arc<Mutex<BTreeMap<String, Value>>>;

/// Sink that keeps each chart as JSON, keyed by container
#[derive(Clone)]
pub struct PayloadSink {
    containers: Vec<String>,
    payloads: PayloadStore,
}

impl PayloadSink {
    pub fn new<I, S>(containers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            containers: containers.into_iter().map(Into::into).collect(),
            payloads: Arc::default(),
        }
    }

    /// Sink with the three standard chart containers
    pub fn standard() -> Self {
        Self::new([
            TREND_CHART_CONTAINER,
            SURFACE_CHART_CONTAINER,
            DAILY_CHART_CONTAINER,
        ])
    }

    /// Payloads currently drawn, keyed by container
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        match self.payloads.lock() {
            Ok(payloads) => payloads.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

struct PayloadHandle {
    container: String,
    payloads: PayloadStore,
}

impl ChartHandle for PayloadHandle {
    fn container(&self) -> &str {
        &self.container
    }

    fn teardown(&mut self) {
        if let Ok(mut payloads) = self.payloads.lock() {
            payloads.remove(&self.container);
        }
    }
}

impl ChartSink for PayloadSink {
    fn has_container(&self, container: &str) -> bool {
        self.containers.iter().any(|c| c == container)
    }

    fn draw(
        &mut self,
        container: &str,
        chart: &Chart,
    ) -> Result<Box<dyn ChartHandle>, ClimateError> {
        let payload = serde_json::to_value(chart)
            .map_err(|e| ClimateError::render(format!("failed to encode chart: {e}")))?;

        self.payloads
            .lock()
            .map_err(|_| ClimateError::render("chart store poisoned"))?
            .insert(container.to_string(), payload);

        Ok(Box::new(PayloadHandle {
            container: container.to_string(),
            payloads: Arc::clone(&self.payloads),
        }))
    }
}
