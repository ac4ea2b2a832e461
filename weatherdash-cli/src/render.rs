//! Plain-text rendering of dashboard state.

use std::fmt::Write;

use weatherdash_core::{
    AppState, BookmarkState, City, Forecast, HourlyData, SavedCity, TemperatureUnit,
    model::{Measurement, icon_url},
    units,
};

pub const CITY_NOT_FOUND: &str = "City not found";

/// Whole dashboard: "Now" panel, 5-day forecast and the hourly list.
pub fn dashboard(state: &AppState, bookmark: BookmarkState) -> String {
    let Some(city) = state.selection.as_ref() else {
        return format!("{CITY_NOT_FOUND}\n");
    };

    let mut out = now(city, state, bookmark);

    if let Some(f) = state.forecast() {
        out.push('\n');
        out.push_str(&forecast(f, state.unit));
    }

    if let Some(h) = state.hourly() {
        out.push('\n');
        out.push_str(&hourly(h, state.unit));
    }

    out
}

pub fn now(city: &City, state: &AppState, bookmark: BookmarkState) -> String {
    let mut out = String::new();
    let weather = state.current_weather();

    let _ = writeln!(out, "{}", city.english_name);
    let _ = writeln!(
        out,
        "  {}  {}",
        state.display_temperature(),
        weather.map(|w| w.weather_text.as_str()).unwrap_or("")
    );

    if let Some(icon) = weather.and_then(|w| w.weather_icon) {
        let _ = writeln!(out, "  Icon: {}", icon_url(icon));
    }

    let date = weather
        .and_then(|w| w.local_observation_date_time)
        .map(|dt| dt.format("%d/%m").to_string())
        .unwrap_or_else(|| "--/--".to_string());
    let _ = writeln!(out, "  {date} - Now");

    let marker = if bookmark.is_bookmarked() { "[saved]" } else { "[not saved]" };
    let _ = writeln!(out, "  {}  {marker}", city.display_name());

    out
}

pub fn forecast(forecast: &Forecast, unit: TemperatureUnit) -> String {
    let mut out = format!("{} Days Forecast\n", forecast.daily_forecasts.len());

    for day in &forecast.daily_forecasts {
        let date = day
            .date
            .map(|d| d.format("%a %d/%m").to_string())
            .unwrap_or_else(|| "---".to_string());

        let (low, high) = match day.temperature.as_ref() {
            Some(range) => (shown(&range.minimum, unit), shown(&range.maximum, unit)),
            None => (placeholder(unit), placeholder(unit)),
        };

        let phrase = day.day.as_ref().map(|d| d.icon_phrase.as_str()).unwrap_or("");
        let _ = writeln!(out, "  {date:<10} {low:>6} / {high:<6} {phrase}");
    }

    out
}

pub fn hourly(hourly: &HourlyData, unit: TemperatureUnit) -> String {
    let mut out = String::from("Later Today\n");

    for hour in hourly {
        let time = hour
            .date_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string());

        let temp = match hour.temperature.as_ref() {
            Some(m) => shown(m, unit),
            None => placeholder(unit),
        };

        let rain = hour
            .precipitation_probability
            .map(|p| format!("{p}%"))
            .unwrap_or_default();

        let _ = writeln!(out, "  {time}  {temp:>6}  {:<20} {rain}", hour.icon_phrase);
    }

    out
}

pub fn candidates(cities: &[City]) -> String {
    if cities.is_empty() {
        return format!("{CITY_NOT_FOUND}\n");
    }

    let mut out = String::new();
    for city in cities {
        let _ = writeln!(out, "{:>10}  {}", city.key, city.display_name());
    }
    out
}

pub fn saved(cities: &[SavedCity], unit: TemperatureUnit) -> String {
    if cities.is_empty() {
        return "No saved cities\n".to_string();
    }

    let mut out = String::new();
    for saved in cities {
        let weather = saved.weather.as_ref();
        let temp = units::convert(weather.and_then(|w| w.fahrenheit()), unit);
        let text = weather.map(|w| w.weather_text.as_str()).unwrap_or("");

        let _ = writeln!(
            out,
            "{:>10}  {:<30} {:>6}  {text}",
            saved.key(),
            saved.city.display_name(),
            temp.to_string()
        );
    }
    out
}

fn shown(m: &Measurement, unit: TemperatureUnit) -> String {
    units::convert(Some(m.fahrenheit()), unit).to_string()
}

fn placeholder(unit: TemperatureUnit) -> String {
    units::convert(None, unit).to_string()
}
