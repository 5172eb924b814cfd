use anyhow::Result;
use mcp_climate_trends::{ClimateConfig, ClimateTrends};
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_climate_trends=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClimateConfig::from_env()?;
    tracing::info!(
        "Starting MCP climate trends server (backend {})",
        config.api_base_url
    );

    let climate = ClimateTrends::new(&config)?;
    let server = climate.clone().serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    climate.teardown().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}
