//! Long-term climate trends for Indian weather stations, served over MCP.
//!
//! A request runs one pipeline: fetch the dataset from the backend (or
//! generate a sample one when it is unreachable), normalize it, aggregate
//! it for the requested view and hand the chart payloads to a sink.

pub mod aggregate;
pub mod charts;
pub mod config;
pub mod constants;
pub mod daily;
pub mod error;
pub mod fetcher;
pub mod formatters;
pub mod models;
pub mod normalize;
pub mod render;
pub mod sample;
pub mod service;
pub mod stats;

pub use aggregate::{aggregate, summarize, ViewSummary};
pub use config::ClimateConfig;
pub use error::ClimateError;
pub use fetcher::{ClimateSource, DataFetcher, HttpClimateSource};
pub use models::{Location, ViewMode, WeatherDataset};
pub use normalize::normalize;
pub use render::{render, ChartSink, PayloadSink, RenderOutcome, RenderSession};
pub use sample::generate_sample_dataset;
pub use service::{ChartsReply, ClimateTrends};
