use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    model::{Coordinates, TemperatureSeries, WeatherRecord},
    provider::openweather::OpenWeatherClient,
};

pub mod openweather;

/// Failure of a single weather API call.
///
/// "City not found" and "network unreachable" are deliberately not told apart
/// beyond what the HTTP status carries.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("City not found or API request failed with status {status}: {body}")]
    NotFoundOrTransport { status: u16, body: String },

    #[error("Failed to reach weather API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse weather API JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city name, returned verbatim.
    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError>;

    /// Hourly temperatures for the 24 hours before now at `coord`, in Celsius.
    async fn fetch_historical_series(
        &self,
        coord: Coordinates,
    ) -> Result<TemperatureSeries, FetchError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        (**self).fetch_current(city).await
    }

    async fn fetch_historical_series(
        &self,
        coord: Coordinates,
    ) -> Result<TemperatureSeries, FetchError> {
        (**self).fetch_historical_series(coord).await
    }
}

/// Construct the OpenWeather client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: run `weather-dashboard configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let client = OpenWeatherClient::builder(api_key.to_owned())
        .base_url(config.base_url())
        .timeout(config.timeout())
        .build()?;

    Ok(Box::new(client))
}
