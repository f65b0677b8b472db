//! Shared fakes for unit tests.

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::{
    model::{Condition, Coordinates, MainReadings, TemperatureSeries, WeatherRecord, Wind},
    provider::{FetchError, WeatherProvider},
    store::RecordId,
};

pub fn london() -> WeatherRecord {
    city("London", 285.15)
}

pub fn city(name: &str, temp_kelvin: f64) -> WeatherRecord {
    WeatherRecord {
        name: name.to_string(),
        coord: Some(Coordinates { lat: 51.51, lon: -0.13 }),
        weather: vec![Condition {
            description: Some("scattered clouds".to_string()),
        }],
        main: Some(MainReadings {
            temp: Some(temp_kelvin),
            humidity: Some(72.0),
        }),
        wind: Some(Wind { speed: Some(4.6) }),
        cod: Some(serde_json::json!(200)),
    }
}

pub fn record_at(raw: u64, name: &str) -> (RecordId, WeatherRecord) {
    (RecordId::from_raw(raw), city(name, 285.15))
}

/// In-memory provider keyed by city name. Unknown cities fail with 404.
#[derive(Debug, Default)]
pub struct FakeProvider {
    cities: Mutex<HashMap<String, WeatherRecord>>,
    history: Option<Vec<f64>>,
    current_calls: AtomicUsize,
    history_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn with_city(self, record: WeatherRecord) -> Self {
        self.cities.lock().unwrap().insert(record.name.clone(), record);
        self
    }

    pub fn with_history(mut self, kelvin: Vec<f64>) -> Self {
        self.history = Some(kelvin);
        self
    }

    pub fn current_calls(&self) -> usize {
        self.current_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        self.cities
            .lock()
            .unwrap()
            .get(city)
            .cloned()
            .ok_or_else(|| FetchError::NotFoundOrTransport {
                status: 404,
                body: r#"{"cod":"404","message":"city not found"}"#.to_string(),
            })
    }

    async fn fetch_historical_series(
        &self,
        _coord: Coordinates,
    ) -> Result<TemperatureSeries, FetchError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        match &self.history {
            Some(kelvin) => Ok(TemperatureSeries::from_kelvin(kelvin.iter().copied())),
            None => Err(FetchError::NotFoundOrTransport {
                status: 401,
                body: "Invalid API key".to_string(),
            }),
        }
    }
}
