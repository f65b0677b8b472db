//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - The OpenWeather fetch client behind the [`WeatherProvider`] trait
//! - City list, pagination and unit conversion state
//! - The per-card 24-hour history chart
//! - Configuration & credentials handling
//!
//! It is used by `dashboard-cli`, but can also be driven by other front ends.

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod pagination;
pub mod provider;
pub mod store;
pub mod units;

#[cfg(test)]
mod testing;

pub use chart::{ChartCanvas, ChartSpec, HistoryChart, SvgCanvas};
pub use config::Config;
pub use dashboard::{CardView, Dashboard, DashboardView};
pub use model::{Coordinates, TemperatureSeries, WeatherRecord};
pub use pagination::{PageControls, Pagination, page_slice};
pub use provider::{FetchError, WeatherProvider, provider_from_config};
pub use store::{CityList, RecordId};
pub use units::{TemperatureUnit, convert};
