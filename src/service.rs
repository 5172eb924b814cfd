use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::aggregate::{aggregate, summarize, ViewSummary};
use crate::charts::{Camera, HighlightTrace};
use crate::config::ClimateConfig;
use crate::error::ClimateError;
use crate::fetcher::{ClimateSource, DataFetcher, HttpClimateSource};
use crate::formatters::{format_camera, format_regions, format_summary};
use crate::models::{
    CameraPreset, CameraViewRequest, ClimateTrendsRequest, HighlightYearRequest, Location,
    WeatherDataset,
};
use crate::render::{render, PayloadSink, RenderOutcome, RenderSession};

/// Reply of a chart render request
#[derive(Debug, Clone, PartialEq)]
pub enum ChartsReply {
    /// Chart payloads keyed by container
    Charts(BTreeMap<String, Value>),
    /// Text summary used when a chart could not be drawn
    Fallback(String),
}

/// Reject a search without both a region and a locality
pub fn validate_selection(state: &str, city: &str) -> Result<Location, ClimateError> {
    let state = state.trim();
    let city = city.trim();
    if state.is_empty() {
        return Err(ClimateError::MissingSelection { field: "state" });
    }
    if city.is_empty() {
        return Err(ClimateError::MissingSelection { field: "city" });
    }
    Ok(Location::new(state, city))
}

fn to_mcp_error(error: ClimateError) -> McpError {
    match error {
        ClimateError::MissingSelection { .. } | ClimateError::InvalidInput { .. } => {
            McpError::invalid_params(error.user_message(), None)
        }
        _ => McpError::internal_error(format!("{}: {}", error.user_message(), error), None),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Failed to encode response: {}", e), None)
    })
}

/// Climate trends service that handles MCP requests
#[derive(Clone)]
pub struct ClimateTrends {
    fetcher: Arc<DataFetcher<Box<dyn ClimateSource>>>,
    rng: Arc<Mutex<StdRng>>,
    session: Arc<Mutex<Option<RenderSession>>>,
    sink: PayloadSink,
    tool_router: ToolRouter<Self>,
}

impl ClimateTrends {
    /// Creates a service backed by the configured HTTP source
    pub fn new(config: &ClimateConfig) -> Result<Self> {
        let source = HttpClimateSource::from_config(config)?;
        Ok(Self::with_source(Box::new(source), config.rng()))
    }

    /// Creates a service around any dataset source
    pub fn with_source(source: Box<dyn ClimateSource>, rng: StdRng) -> Self {
        Self {
            fetcher: Arc::new(DataFetcher::new(source)),
            rng: Arc::new(Mutex::new(rng)),
            session: Arc::new(Mutex::new(None)),
            sink: PayloadSink::standard(),
            tool_router: Self::tool_router(),
        }
    }

    /// Fetch (or generate) the dataset and aggregate it for the requested view
    pub async fn run_pipeline(
        &self,
        request: &ClimateTrendsRequest,
    ) -> Result<WeatherDataset, ClimateError> {
        let location = validate_selection(&request.state, &request.city)?;
        tracing::info!(
            "Loading climate data for {}, {} ({:?})",
            location.locality,
            location.region,
            request.view
        );

        let mut rng = self.rng.lock().await;
        let mut dataset = self.fetcher.fetch(&location, &mut *rng).await;
        aggregate(&mut dataset, request.view, request.month, &mut *rng)?;
        Ok(dataset)
    }

    /// Summary statistics for the requested view
    pub async fn trends(
        &self,
        request: &ClimateTrendsRequest,
    ) -> Result<(WeatherDataset, ViewSummary), ClimateError> {
        let dataset = self.run_pipeline(request).await?;
        let summary = summarize(&dataset, request.view).ok_or(ClimateError::MissingSeries {
            series: "summary",
        })?;
        Ok((dataset, summary))
    }

    /// Tear down the previous charts, then render the requested view
    pub async fn render_charts(
        &self,
        request: &ClimateTrendsRequest,
    ) -> Result<ChartsReply, ClimateError> {
        let mut current = self.session.lock().await;
        if let Some(mut previous) = current.take() {
            previous.teardown();
        }

        let mut dataset = self.run_pipeline(request).await?;
        let mut sink = self.sink.clone();
        let mut rng = self.rng.lock().await;

        match render(&mut dataset, request.view, &mut sink, &mut *rng)? {
            RenderOutcome::Rendered(session) => {
                *current = Some(session);
                Ok(ChartsReply::Charts(self.sink.snapshot()))
            }
            RenderOutcome::Fallback(text) => Ok(ChartsReply::Fallback(text)),
        }
    }

    /// Apply a camera preset to the rendered surface
    pub async fn set_camera(&self, preset: CameraPreset) -> Result<(Camera, bool), ClimateError> {
        let mut current = self.session.lock().await;
        let surface = current
            .as_mut()
            .and_then(RenderSession::surface_mut)
            .ok_or_else(|| ClimateError::invalid_input("no 3D chart has been rendered"))?;
        let camera = surface.set_preset(preset);
        Ok((camera, surface.is_rotating()))
    }

    /// Start or stop auto-rotation of the rendered surface
    pub async fn toggle_surface_rotation(&self) -> Result<(Camera, bool), ClimateError> {
        let mut current = self.session.lock().await;
        let surface = current
            .as_mut()
            .and_then(RenderSession::surface_mut)
            .ok_or_else(|| ClimateError::invalid_input("no 3D chart has been rendered"))?;
        let rotating = surface.toggle_rotation();
        Ok((surface.camera(), rotating))
    }

    /// Highlight one year of the rendered surface, `None` clears it
    pub async fn highlight(
        &self,
        year: Option<i32>,
    ) -> Result<Option<HighlightTrace>, ClimateError> {
        let mut current = self.session.lock().await;
        let surface = current
            .as_mut()
            .and_then(RenderSession::surface_mut)
            .ok_or_else(|| ClimateError::invalid_input("no 3D chart has been rendered"))?;
        Ok(surface.highlight(year).cloned())
    }

    /// Tear down whatever the last render created
    pub async fn teardown(&self) {
        if let Some(mut session) = self.session.lock().await.take() {
            session.teardown();
        }
    }
}

#[tool_handler]
impl ServerHandler for ClimateTrends {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-climate-trends".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Long-term temperature trends (1970-2020) for Indian weather stations. \
                Pick a state and city from list_regions, then ask for annual, monthly or daily \
                trends, or render the chart payloads."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl ClimateTrends {
    /// Lists the regions and localities with climate data
    #[tool(description = "List the available states and the cities/stations in each.")]
    async fn list_regions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(format_regions())]))
    }

    /// Gets summary statistics for one view of a location
    #[tool(description = "Get temperature trends for a state and city. view is 'annual' (default), 'monthly' (with month 0-11, 0 = January) or 'daily' (first/middle/last year compared day by day).")]
    async fn get_climate_trends(
        &self,
        Parameters(request): Parameters<ClimateTrendsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let (dataset, summary) = self.trends(&request).await.map_err(to_mcp_error)?;

        let formatted = format_summary(&dataset, &summary);

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    /// Renders the chart payloads for one view of a location
    #[tool(description = "Render the temperature charts (trend line, 3D monthly surface, daily comparison) for a state and city and return their data as JSON. Replaces any previously rendered charts.")]
    async fn render_climate_charts(
        &self,
        Parameters(request): Parameters<ClimateTrendsRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.render_charts(&request).await.map_err(to_mcp_error)? {
            ChartsReply::Charts(charts) => {
                Ok(CallToolResult::success(vec![Content::text(to_json(&charts)?)]))
            }
            ChartsReply::Fallback(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        }
    }

    /// Moves the 3D surface camera to a preset
    #[tool(description = "Set the 3D chart camera to 'default', 'top', 'side' or 'front'. Any view but default stops auto-rotation.")]
    async fn set_camera_view(
        &self,
        Parameters(request): Parameters<CameraViewRequest>,
    ) -> Result<CallToolResult, McpError> {
        let (camera, rotating) = self.set_camera(request.view).await.map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format_camera(
            &camera, rotating,
        ))]))
    }

    /// Starts or stops 3D surface auto-rotation
    #[tool(description = "Toggle auto-rotation of the 3D chart.")]
    async fn toggle_rotation(&self) -> Result<CallToolResult, McpError> {
        let (camera, rotating) = self
            .toggle_surface_rotation()
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format_camera(
            &camera, rotating,
        ))]))
    }

    /// Highlights a year on the 3D surface
    #[tool(description = "Highlight one year on the 3D chart as a line, or pass null to clear the highlight.")]
    async fn highlight_year(
        &self,
        Parameters(request): Parameters<HighlightYearRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = match self.highlight(request.year).await.map_err(to_mcp_error)? {
            Some(trace) => to_json(&trace)?,
            None => "No year highlighted.".to_string(),
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_requires_state_then_city() {
        let err = validate_selection("  ", "AGRA").unwrap_err();
        assert!(matches!(err, ClimateError::MissingSelection { field: "state" }));

        let err = validate_selection("Uttar Pradesh", "").unwrap_err();
        assert!(matches!(err, ClimateError::MissingSelection { field: "city" }));

        let location = validate_selection(" Uttar Pradesh ", "AGRA").unwrap();
        assert_eq!(location, Location::new("Uttar Pradesh", "AGRA"));
    }

    #[test]
    fn test_selection_errors_are_invalid_params() {
        let err = to_mcp_error(ClimateError::MissingSelection { field: "city" });
        assert_eq!(err.message, "Please select a city.");
    }
}
