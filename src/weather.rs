//! Weather provider client
//!
//! Fetches current and hourly barometric pressure from a Dark Sky
//! compatible forecast endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

use crate::BarowatchError;
use crate::config::BarowatchConfig;
use crate::models::ForecastSnapshot;

/// Source of forecast snapshots
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Fetch the current pressure and the ordered hourly pressures
    async fn fetch_snapshot(&self) -> crate::Result<ForecastSnapshot>;
}

/// HTTP client for a Dark Sky compatible forecast endpoint
#[derive(Debug)]
pub struct DarkSkyClient {
    client: Client,
    url: String,
}

impl DarkSkyClient {
    /// Create a client for the given request URL
    pub fn new(url: impl Into<String>, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("barowatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BarowatchError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &BarowatchConfig) -> crate::Result<Self> {
        Self::new(
            config.request_url()?,
            Duration::from_secs(config.provider.timeout_seconds),
        )
    }
}

#[async_trait]
impl ForecastSource for DarkSkyClient {
    #[instrument(skip(self))]
    async fn fetch_snapshot(&self) -> crate::Result<ForecastSnapshot> {
        info!("Fetching hourly pressure forecast");
        let start_time = Instant::now();

        // the request URL embeds the API key
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            let e = e.without_url();
            error!("Forecast request failed: {}", e);
            BarowatchError::network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Forecast provider answered with HTTP {}", status);
            return Err(BarowatchError::network(format!(
                "Forecast request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BarowatchError::network(e.without_url().to_string()))?;
        let forecast: darksky::ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse forecast response: {}", e);
            BarowatchError::parse(format!("Invalid forecast data: {e}"))
        })?;

        let snapshot = ForecastSnapshot::from(forecast);
        debug!(
            current = snapshot.current_pressure,
            hours = snapshot.hourly_pressures.len(),
            "Parsed forecast snapshot"
        );
        info!(
            "Retrieved {} hourly readings in {:.3}s",
            snapshot.hourly_pressures.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(snapshot)
    }
}

/// Dark Sky response structures; only the pressure fields are read
mod darksky {
    use serde::Deserialize;

    use crate::models::ForecastSnapshot;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub currently: DataPoint,
        pub hourly: DataBlock,
    }

    #[derive(Debug, Deserialize)]
    pub struct DataBlock {
        pub data: Vec<DataPoint>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DataPoint {
        /// Sea-level pressure in hPa
        pub pressure: f64,
    }

    impl From<ForecastResponse> for ForecastSnapshot {
        fn from(response: ForecastResponse) -> Self {
            ForecastSnapshot::new(
                response.currently.pressure,
                response.hourly.data.into_iter().map(|p| p.pressure).collect(),
            )
        }
    }
}
