use crate::{
    Config,
    error::ClientError,
    model::{City, CurrentWeather, Forecast, HourlyData, is_valid_location_key},
    provider::accuweather::AccuWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod accuweather;

/// The weather calls the dashboard makes, keyed by provider location key.
///
/// Every call is independent: no ordering, no de-duplication, no retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Candidate cities for a free-text query.
    async fn search_cities(&self, query: &str) -> Result<Vec<City>, ClientError>;

    async fn current_conditions(&self, key: &str) -> Result<CurrentWeather, ClientError>;

    /// Five-day daily forecast.
    async fn daily_forecast(&self, key: &str) -> Result<Forecast, ClientError>;

    /// Twelve-hour hourly forecast.
    async fn hourly_forecast(&self, key: &str) -> Result<HourlyData, ClientError>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<AccuWeatherProvider> {
    let api_key = config.api_key()?;

    let mut provider =
        AccuWeatherProvider::new(api_key.to_owned())?.with_timeout(config.timeout())?;

    if let Some(base_url) = config.base_url.as_deref() {
        provider = provider.with_base_url(base_url);
    }

    Ok(provider)
}

pub(crate) fn validate_key(key: &str) -> Result<&str, ClientError> {
    let key = key.trim();
    if is_valid_location_key(key) { Ok(key) } else { Err(ClientError::InvalidKey(key.to_string())) }
}
