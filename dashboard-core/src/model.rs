use serde::{Deserialize, Serialize};

use crate::units::kelvin_to_celsius;

/// Number of hourly samples a history chart plots.
pub const SERIES_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Condition {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MainReadings {
    /// Kelvin.
    #[serde(default)]
    pub temp: Option<f64>,
    /// Percent.
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Wind {
    #[serde(default)]
    pub speed: Option<f64>,
}

/// One fetched city's current conditions, kept as the API returned it.
///
/// Nothing beyond JSON shape is checked, so every nested field is optional and
/// the accessors fall back to `NaN` or `"undefined"` for missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeatherRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub coord: Option<Coordinates>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub wind: Option<Wind>,
    /// OpenWeather sends this as a number on success and a string on errors.
    #[serde(default)]
    pub cod: Option<serde_json::Value>,
}

impl WeatherRecord {
    pub fn is_success_code(&self) -> bool {
        self.cod.as_ref().and_then(serde_json::Value::as_i64) == Some(200)
    }

    pub fn description(&self) -> &str {
        self.weather
            .first()
            .and_then(|c| c.description.as_deref())
            .unwrap_or("undefined")
    }

    pub fn temp_kelvin(&self) -> f64 {
        self.main.as_ref().and_then(|m| m.temp).unwrap_or(f64::NAN)
    }

    pub fn humidity(&self) -> f64 {
        self.main.as_ref().and_then(|m| m.humidity).unwrap_or(f64::NAN)
    }

    pub fn wind_speed(&self) -> f64 {
        self.wind.as_ref().and_then(|w| w.speed).unwrap_or(f64::NAN)
    }
}

/// Hourly temperatures in Celsius, oldest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemperatureSeries {
    pub samples: Vec<f64>,
}

impl TemperatureSeries {
    pub fn from_kelvin<I: IntoIterator<Item = f64>>(kelvin: I) -> Self {
        Self {
            samples: kelvin.into_iter().map(kelvin_to_celsius).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.finite().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.finite().reduce(f64::max)
    }

    fn finite(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied().filter(|v| v.is_finite())
    }
}
