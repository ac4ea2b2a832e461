use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    error::ClientError,
    model::{City, CurrentWeather, Forecast, HourlyData},
    provider::{WeatherProvider, validate_key},
};

pub const DEFAULT_BASE_URL: &str = "https://dataservice.accuweather.com";

#[derive(Debug, Clone)]
pub struct AccuWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl AccuWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, ClientError> {
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::builder().build().map_err(ClientError::Build)?,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ClientError> {
        self.http = Client::builder().timeout(timeout).build().map_err(ClientError::Build)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        what: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, what, "requesting");

        let res = self
            .http
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Request { what, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| ClientError::Request { what, source })?;

        if !status.is_success() {
            tracing::debug!(what, %status, "provider returned an error status");
            return Err(ClientError::Status { what, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Decode { what, source })
    }
}

#[async_trait]
impl WeatherProvider for AccuWeatherProvider {
    async fn search_cities(&self, query: &str) -> Result<Vec<City>, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.get_json("city search", "/locations/v1/cities/search", &[("q", query)]).await
    }

    async fn current_conditions(&self, key: &str) -> Result<CurrentWeather, ClientError> {
        let key = validate_key(key)?;
        let what = "current conditions";

        // The provider answers with a one-element array.
        let readings: Vec<CurrentWeather> = self
            .get_json(what, &format!("/currentconditions/v1/{key}"), WEATHER_QUERY)
            .await?;

        readings.into_iter().next().ok_or(ClientError::Empty { what })
    }

    async fn daily_forecast(&self, key: &str) -> Result<Forecast, ClientError> {
        let key = validate_key(key)?;

        self.get_json("5-day forecast", &format!("/forecasts/v1/daily/5day/{key}"), WEATHER_QUERY)
            .await
    }

    async fn hourly_forecast(&self, key: &str) -> Result<HourlyData, ClientError> {
        let key = validate_key(key)?;

        self.get_json(
            "hourly forecast",
            &format!("/forecasts/v1/hourly/12hour/{key}"),
            WEATHER_QUERY,
        )
        .await
    }
}

// Readings stay imperial; the unit converter does the rest.
const WEATHER_QUERY: &[(&str, &str)] = &[("details", "false"), ("metric", "false")];

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let long = "é".repeat(250);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let provider = AccuWeatherProvider::new("KEY".into()).unwrap().with_base_url("http://x/");
        assert_eq!(provider.base_url(), "http://x");
    }

    #[tokio::test]
    async fn invalid_key_short_circuits_before_any_request() {
        // Unroutable base URL: reaching the network would fail differently.
        let provider =
            AccuWeatherProvider::new("KEY".into()).unwrap().with_base_url("http://127.0.0.1:9");

        let err = provider.current_conditions("").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn blank_search_returns_no_candidates() {
        let provider =
            AccuWeatherProvider::new("KEY".into()).unwrap().with_base_url("http://127.0.0.1:9");

        assert!(provider.search_cities("   ").await.unwrap().is_empty());
    }
}
