use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ClimateConfig;
use crate::constants::{USER_AGENT, WEATHER_DATA_PATH};
use crate::error::ClimateError;
use crate::models::{Location, WeatherDataset};
use crate::normalize::normalize;
use crate::sample::generate_sample_dataset;

/// Where raw datasets come from
#[async_trait]
pub trait ClimateSource: Send + Sync {
    async fn fetch_raw(&self, location: &Location) -> Result<WeatherDataset, ClimateError>;
}

/// Climate backend reached over HTTP
pub struct HttpClimateSource {
    client: Client,
    base_url: String,
}

impl HttpClimateSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClimateConfig) -> anyhow::Result<Self> {
        Self::new(&config.api_base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> anyhow::Result<T> {
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let details = response.text().await.unwrap_or_default();
            anyhow::bail!("Request failed with status: {}, details: {}", status, details);
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }
}

#[async_trait]
impl ClimateSource for HttpClimateSource {
    async fn fetch_raw(&self, location: &Location) -> Result<WeatherDataset, ClimateError> {
        let url = format!("{}{}", self.base_url, WEATHER_DATA_PATH);
        tracing::info!("Fetching data from: {}", url);

        self.make_request::<WeatherDataset>(
            &url,
            &[
                ("state", location.region.as_str()),
                ("city", location.locality.as_str()),
            ],
        )
        .await
        .map_err(|e| ClimateError::source_unavailable(format!("{e:#}")))
    }
}

#[async_trait]
impl<T: ClimateSource + ?Sized> ClimateSource for Box<T> {
    async fn fetch_raw(&self, location: &Location) -> Result<WeatherDataset, ClimateError> {
        (**self).fetch_raw(location).await
    }
}

fn has_temperatures(dataset: &WeatherDataset) -> bool {
    dataset.yearly().is_some_and(|y| !y.is_empty())
        || dataset.monthly().is_some_and(|m| !m.is_empty())
}

/// Fetches a dataset and never fails: any source error turns into sample data
pub struct DataFetcher<S> {
    source: S,
}

impl<S: ClimateSource> DataFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// One attempt against the source, normalized on success. Failures and
    /// payloads without any temperature series are replaced by sample data.
    pub async fn fetch(&self, location: &Location, rng: &mut (impl Rng + Send)) -> WeatherDataset {
        match self.source.fetch_raw(location).await {
            Ok(mut dataset) => {
                normalize(&mut dataset);
                if has_temperatures(&dataset) {
                    tracing::info!(
                        "Successfully fetched data for {}, {}",
                        location.locality,
                        location.region
                    );
                    return dataset;
                }
                tracing::warn!(
                    "No temperature series in response for {}, {}",
                    location.locality,
                    location.region
                );
                tracing::info!("Falling back to sample data");
                generate_sample_dataset(location.clone(), rng)
            }
            Err(e) => {
                tracing::warn!("Error fetching weather data: {}", e);
                tracing::info!("Falling back to sample data");
                generate_sample_dataset(location.clone(), rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureData;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Unavailable;

    #[async_trait]
    impl ClimateSource for Unavailable {
        async fn fetch_raw(&self, _location: &Location) -> Result<WeatherDataset, ClimateError> {
            Err(ClimateError::source_unavailable("offline"))
        }
    }

    struct YearlyOnly;

    #[async_trait]
    impl ClimateSource for YearlyOnly {
        async fn fetch_raw(&self, location: &Location) -> Result<WeatherDataset, ClimateError> {
            let mut dataset = WeatherDataset::new(location.clone());
            dataset.years = vec![2001, 2002, 2003];
            dataset.temperature = Some(TemperatureData {
                yearly: Some(vec![25.0, 25.5, 25.2]),
                ..Default::default()
            });
            Ok(dataset)
        }
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_sample() {
        let fetcher = DataFetcher::new(Unavailable);
        let location = Location::new("Odisha", "BALASORE");
        let dataset = fetcher
            .fetch(&location, &mut StdRng::seed_from_u64(1))
            .await;
        assert_eq!(dataset.location, location);
        assert_eq!(dataset.years.len(), 51);
        assert_eq!(dataset.monthly().unwrap().len(), 51);
    }

    #[tokio::test]
    async fn test_success_is_normalized() {
        let fetcher = DataFetcher::new(YearlyOnly);
        let location = Location::new("Gujarat", "SURAT");
        let dataset = fetcher
            .fetch(&location, &mut StdRng::seed_from_u64(1))
            .await;
        assert_eq!(dataset.years, vec![2001, 2002, 2003]);
        assert_eq!(dataset.monthly().unwrap().len(), 3);
        assert!(dataset.rainfall.is_some());
        assert_eq!(dataset.months.len(), 12);
    }

    struct NoTemperatures;

    #[async_trait]
    impl ClimateSource for NoTemperatures {
        async fn fetch_raw(&self, _location: &Location) -> Result<WeatherDataset, ClimateError> {
            let body = r#"{"location":{"state":"Goa","city":"GOA or PANJIM"},"years":[1970,1971]}"#;
            Ok(serde_json::from_str(body).unwrap())
        }
    }

    #[tokio::test]
    async fn test_response_without_temperatures_falls_back_to_sample() {
        let fetcher = DataFetcher::new(NoTemperatures);
        let location = Location::new("Goa", "GOA or PANJIM");
        let dataset = fetcher
            .fetch(&location, &mut StdRng::seed_from_u64(3))
            .await;
        assert_eq!(dataset.location, location);
        assert_eq!(dataset.years.len(), 51);
        assert_eq!(dataset.yearly().unwrap().len(), 51);
        assert!(dataset.temperature.unwrap().trend.is_some());
    }

    #[tokio::test]
    async fn test_empty_series_falls_back_to_sample() {
        struct EmptySeries;

        #[async_trait]
        impl ClimateSource for EmptySeries {
            async fn fetch_raw(
                &self,
                location: &Location,
            ) -> Result<WeatherDataset, ClimateError> {
                let mut dataset = WeatherDataset::new(location.clone());
                dataset.temperature = Some(TemperatureData {
                    yearly: Some(Vec::new()),
                    monthly: Some(Vec::new()),
                    ..Default::default()
                });
                Ok(dataset)
            }
        }

        let dataset = DataFetcher::new(EmptySeries)
            .fetch(&Location::new("Goa", "GOA or PANJIM"), &mut StdRng::seed_from_u64(4))
            .await;
        assert_eq!(dataset.monthly().unwrap().len(), 51);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source =
            HttpClimateSource::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.base_url, "http://localhost:5000");
    }
}
