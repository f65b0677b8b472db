use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::model::{Coordinates, TemperatureSeries, WeatherRecord};

use super::{FetchError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

#[derive(Debug)]
pub struct OpenWeatherClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl OpenWeatherClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// `None` leaves requests without a deadline.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<OpenWeatherClient, FetchError> {
        let mut http = Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        Ok(OpenWeatherClient {
            api_key: self.api_key,
            base_url: self.base_url,
            http: http.build()?,
        })
    }
}

impl OpenWeatherClient {
    pub fn builder(api_key: String) -> OpenWeatherClientBuilder {
        OpenWeatherClientBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Self::builder(api_key).build()
    }

    async fn get_body(&self, path: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let url = format!("{}/{path}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::NotFoundOrTransport {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwHour {
    #[serde(default)]
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwTimeMachineResponse {
    #[serde(default)]
    hourly: Vec<OwHour>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        let body = self.get_body("weather", &[("q", city.to_string())]).await?;
        let record: WeatherRecord = serde_json::from_str(&body)?;
        debug!(name = %record.name, "fetched current conditions");
        Ok(record)
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_historical_series(
        &self,
        coord: Coordinates,
    ) -> Result<TemperatureSeries, FetchError> {
        let dt = (Utc::now() - ChronoDuration::hours(24)).timestamp();

        let body = self
            .get_body(
                "onecall/timemachine",
                &[
                    ("lat", coord.lat.to_string()),
                    ("lon", coord.lon.to_string()),
                    ("dt", dt.to_string()),
                ],
            )
            .await?;

        let parsed: OwTimeMachineResponse = serde_json::from_str(&body)?;
        debug!(samples = parsed.hourly.len(), "fetched historical series");
        // An hour without a reading stays in place as NaN.
        let kelvin = parsed.hourly.into_iter().map(|h| h.temp.unwrap_or(f64::NAN));
        Ok(TemperatureSeries::from_kelvin(kelvin))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
