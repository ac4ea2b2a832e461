//! Core library for the `weatherdash` city weather dashboard.
//!
//! This crate defines:
//! - Configuration handling
//! - The weather provider abstraction and its AccuWeather client
//! - Application state, the reducer that drives it, and the dashboard
//!   runtime that turns city selections into weather fetches
//! - Bookmark persistence over an injectable key-value store
//! - Temperature unit conversion
//!
//! It is used by `weatherdash-cli`, but can also be reused by other front ends.

pub mod action;
pub mod bookmarks;
pub mod config;
pub mod dashboard;
pub mod effect;
pub mod error;
pub mod model;
pub mod provider;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod units;

pub use bookmarks::{BookmarkState, Bookmarks, SAVED_CITIES_KEY};
pub use config::Config;
pub use dashboard::{Dashboard, Pending};
pub use error::{ClientError, StoreError};
pub use model::{City, CurrentWeather, DayForecast, Forecast, HourlyData, HourlyForecast, SavedCity};
pub use provider::{WeatherProvider, accuweather::AccuWeatherProvider, provider_from_config};
pub use state::AppState;
pub use storage::{FileStore, JsonStore, KeyValueStore, MemoryStore};
pub use units::{DisplayTemperature, TemperatureUnit};
