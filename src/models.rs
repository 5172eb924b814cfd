use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Climate Dataset Models
// ============================================================================

/// Region/locality pair identifying a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "state")]
    pub region: String,
    #[serde(rename = "city")]
    pub locality: String,
}

impl Location {
    pub fn new(region: impl Into<String>, locality: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            locality: locality.into(),
        }
    }
}

/// One row of twelve monthly temperatures, January first
pub type MonthlyRow = [f64; 12];

/// Root aggregate for one location, as served by the backend or generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDataset {
    pub location: Location,
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub months: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<RainfallData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extreme_events: Option<ExtremeEventsData>,
}

impl WeatherDataset {
    /// An empty dataset for `location`, everything else absent
    pub fn new(location: Location) -> Self {
        Self {
            location,
            years: Vec::new(),
            months: Vec::new(),
            temperature: None,
            rainfall: None,
            extreme_events: None,
        }
    }

    pub fn yearly(&self) -> Option<&[f64]> {
        self.temperature.as_ref()?.yearly.as_deref()
    }

    pub fn monthly(&self) -> Option<&[MonthlyRow]> {
        self.temperature.as_ref()?.monthly.as_deref()
    }

    pub fn daily(&self) -> Option<&DailyComparison> {
        self.temperature.as_ref()?.daily.as_ref()
    }

    pub fn monthly_avg(&self) -> Option<&MonthlyAverage> {
        self.temperature.as_ref()?.monthly_avg.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Vec<MonthlyRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailyComparison>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_avg: Option<MonthlyAverage>,
}

/// Daily temperatures of the first, middle and last year plus their deltas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyComparison {
    pub years: Vec<i32>,
    pub temperatures: Vec<Vec<f64>>,
    pub increases: Vec<f64>,
    pub average_increase: f64,
    #[serde(default)]
    pub day_labels: Vec<u32>,
}

/// One calendar month followed across every year of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    pub month: String,
    pub values: Vec<f64>,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub trend: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RainfallData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monsoon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_monsoon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtremeEventsData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatwaves: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heavy_rain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub droughts: Option<String>,
}

/// Temporal granularity targeted by aggregation and rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Annual,
    Monthly,
    Daily,
}

/// Named camera positions for the 3D surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CameraPreset {
    #[default]
    Default,
    Top,
    Side,
    Front,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ClimateTrendsRequest {
    /// Region (state) name, e.g. "Delhi (NCT)"
    pub state: String,
    /// Locality (city or station) name, e.g. "SAFDARJUNG (New Delhi)"
    pub city: String,
    /// annual, monthly or daily
    #[serde(default)]
    pub view: ViewMode,
    /// Month index 0-11, used by the monthly view
    #[serde(default)]
    pub month: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CameraViewRequest {
    pub view: CameraPreset,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct HighlightYearRequest {
    /// Year to overlay, or null to clear the highlight
    #[serde(default)]
    pub year: Option<i32>,
}
