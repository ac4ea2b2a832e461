//! Temperature display conversion.
//!
//! The provider reports Fahrenheit; the dashboard shows whole degrees in the
//! unit the user picked.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggle(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
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
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

/// A temperature ready for display. `temperature` is `None` when there was no
/// usable reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTemperature {
    pub temperature: Option<i64>,
    pub unit: TemperatureUnit,
}

impl fmt::Display for DisplayTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.temperature {
            Some(t) => write!(f, "{t}{}", self.unit.symbol()),
            None => write!(f, "--{}", self.unit.symbol()),
        }
    }
}

/// Convert a Fahrenheit reading for display. Total: missing or non-finite
/// input yields an empty temperature.
pub fn convert(fahrenheit: Option<f64>, unit: TemperatureUnit) -> DisplayTemperature {
    let temperature = fahrenheit.filter(|f| f.is_finite()).map(|f| match unit {
        TemperatureUnit::Celsius => round_half_up(fahrenheit_to_celsius(f)),
        TemperatureUnit::Fahrenheit => round_half_up(f),
    });

    DisplayTemperature { temperature, unit }
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

// Halves go toward +inf, so -0.5 becomes 0 rather than -1.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
