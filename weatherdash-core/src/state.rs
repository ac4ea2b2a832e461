//! Application state: the single source of truth the dashboard renders from.

use chrono::{DateTime, Utc};

use crate::{
    model::{City, CurrentWeather, Forecast, HourlyData},
    units::{self, DisplayTemperature, TemperatureUnit},
};

/// A fetched value tagged with the location key that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub key: String,
    pub data: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> Fetched<T> {
    pub fn new(key: impl Into<String>, data: T) -> Self {
        Self { key: key.into(), data, fetched_at: Utc::now() }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// `None` until a city is picked.
    pub selection: Option<City>,

    /// Last successful fetch of each kind for the selected city.
    pub current: Option<Fetched<CurrentWeather>>,
    pub forecast: Option<Fetched<Forecast>>,
    pub hourly: Option<Fetched<HourlyData>>,

    pub unit: TemperatureUnit,

    /// Bumped whenever the selection changes; fetches carry the value they started under.
    pub generation: u64,
}

impl AppState {
    pub fn new(unit: TemperatureUnit) -> Self {
        Self { unit, ..Default::default() }
    }

    /// Key of the selected city, if one is selected.
    pub fn selected_key(&self) -> Option<&str> {
        self.selection.as_ref().map(|c| c.key.as_str())
    }

    /// Whether a result fetched for `key` still belongs in state.
    pub fn is_current_key(&self, key: &str) -> bool {
        self.selected_key() == Some(key)
    }

    /// Whether a result from a fetch started under `generation` for `key` is still wanted.
    ///
    /// The key alone is not enough: after A -> B -> A an old A request would match.
    pub fn accepts(&self, key: &str, generation: u64) -> bool {
        self.generation == generation && self.is_current_key(key)
    }

    pub fn current_weather(&self) -> Option<&CurrentWeather> {
        self.current.as_ref().map(|f| &f.data)
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref().map(|f| &f.data)
    }

    pub fn hourly(&self) -> Option<&HourlyData> {
        self.hourly.as_ref().map(|f| &f.data)
    }

    /// Current temperature in the chosen display unit.
    pub fn display_temperature(&self) -> DisplayTemperature {
        units::convert(self.current_weather().and_then(CurrentWeather::fahrenheit), self.unit)
    }

    pub(crate) fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub(crate) fn clear_weather(&mut self) {
        self.current = None;
        self.forecast = None;
        self.hourly = None;
    }
}
