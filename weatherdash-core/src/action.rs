//! Everything that can change `AppState`.

use crate::model::{City, CurrentWeather, Forecast, HourlyData};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ===== Selection =====
    /// A city was picked from the search results.
    SelectCity(City),

    /// Nothing is selected any more.
    ClearSelection,

    // ===== Fetch results (tagged with the key and selection generation they were requested for) =====
    CurrentLoaded { key: String, generation: u64, data: CurrentWeather },
    ForecastLoaded { key: String, generation: u64, data: Forecast },
    HourlyLoaded { key: String, generation: u64, data: HourlyData },

    // ===== UI =====
    /// Switch between Celsius and Fahrenheit.
    ToggleUnit,
}
