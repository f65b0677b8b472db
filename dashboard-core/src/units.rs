use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset between Kelvin and Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Display unit for every temperature on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    /// Caption for the toggle control: the unit it switches *to*.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Fahrenheit",
            TemperatureUnit::Fahrenheit => "Celsius",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Format a Kelvin reading for display in `unit` with two decimals.
///
/// Non-finite input is not rejected: a NaN reading renders as `NaN°C`.
pub fn convert(kelvin: f64, unit: TemperatureUnit) -> String {
    let celsius = kelvin_to_celsius(kelvin);
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 1.8 + 32.0,
    };
    format!("{value:.2}{}", unit.suffix())
}
