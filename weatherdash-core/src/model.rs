use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Base URL for the provider's weather icon sprites.
const ICON_BASE_URL: &str = "https://developer.accuweather.com/sites/default/files";

/// A city candidate returned by the location search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct City {
    /// Provider location key, e.g. "623".
    pub key: String,
    pub english_name: String,
    pub country: Country,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_position: Option<GeoPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub english_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn new(key: impl Into<String>, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            english_name: name.into(),
            country: Country { id: None, english_name: country.into() },
            geo_position: None,
        }
    }

    /// Whether the key can be sent to the provider; see [`is_valid_location_key`].
    pub fn has_valid_key(&self) -> bool {
        is_valid_location_key(&self.key)
    }

    /// "Paris, France"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.english_name, self.country.english_name)
    }
}

/// One temperature reading as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Measurement {
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<u32>,
}

impl Measurement {
    /// The reading in Fahrenheit. Readings without a unit are taken as Fahrenheit.
    pub fn fahrenheit(&self) -> f64 {
        if self.unit.eq_ignore_ascii_case("C") {
            self.value * 9.0 / 5.0 + 32.0
        } else {
            self.value
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Temperature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<Measurement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imperial: Option<Measurement>,
}

/// Current conditions for a location.
///
/// Only the fields the dashboard reads are typed; everything else the provider
/// sends is kept in `extra` so a bookmarked snapshot round-trips untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentWeather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_observation_date_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub weather_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_icon: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrentWeather {
    /// `Temperature.Imperial.Value`, if the provider sent one.
    pub fn fahrenheit(&self) -> Option<f64> {
        self.temperature
            .as_ref()
            .and_then(|t| t.imperial.as_ref())
            .map(|m| m.value)
    }
}

/// Five-day daily forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Forecast {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<Value>,
    #[serde(default)]
    pub daily_forecasts: Vec<DayForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemperatureRange {
    pub minimum: Measurement,
    pub maximum: Measurement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DayPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<u8>,
    #[serde(default)]
    pub icon_phrase: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DayForecast {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<DayPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night: Option<DayPart>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the 12-hour forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HourlyForecast {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_icon: Option<u8>,
    #[serde(default)]
    pub icon_phrase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Measurement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<u8>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type HourlyData = Vec<HourlyForecast>;

/// A bookmarked city with the weather it had when it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCity {
    #[serde(flatten)]
    pub city: City,
    #[serde(default)]
    pub weather: Option<CurrentWeather>,
}

impl SavedCity {
    pub fn key(&self) -> &str {
        &self.city.key
    }
}

/// Location keys end up in URL paths, so only allow what the provider issues.
pub fn is_valid_location_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Icon sprite URL for a provider icon number; single digits are zero-padded.
pub fn icon_url(icon: u8) -> String {
    format!("{ICON_BASE_URL}/{icon:02}-s.png")
}
