//! Integration tests for AccuWeatherProvider and the dashboard using wiremock.

use std::{sync::Arc, time::Duration};

use reqwest::StatusCode;
use weatherdash_core::{
    AccuWeatherProvider, City, ClientError, Dashboard, TemperatureUnit, WeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body() -> serde_json::Value {
    serde_json::json!([{
        "LocalObservationDateTime": "2024-05-01T14:25:00+02:00",
        "EpochTime": 1714566300,
        "WeatherText": "Partly sunny",
        "WeatherIcon": 3,
        "Temperature": {
            "Metric": { "Value": 20.0, "Unit": "C", "UnitType": 17 },
            "Imperial": { "Value": 68.0, "Unit": "F", "UnitType": 18 }
        }
    }])
}

fn forecast_body() -> serde_json::Value {
    let day = |date: &str| {
        serde_json::json!({
            "Date": date,
            "Temperature": {
                "Minimum": { "Value": 50.0, "Unit": "F", "UnitType": 18 },
                "Maximum": { "Value": 70.0, "Unit": "F", "UnitType": 18 }
            },
            "Day": { "Icon": 1, "IconPhrase": "Sunny", "HasPrecipitation": false },
            "Night": { "Icon": 33, "IconPhrase": "Clear", "HasPrecipitation": false }
        })
    };

    serde_json::json!({
        "Headline": { "Text": "Pleasant this week" },
        "DailyForecasts": [
            day("2024-05-01T07:00:00+02:00"),
            day("2024-05-02T07:00:00+02:00"),
            day("2024-05-03T07:00:00+02:00"),
            day("2024-05-04T07:00:00+02:00"),
            day("2024-05-05T07:00:00+02:00"),
        ]
    })
}

fn hourly_body() -> serde_json::Value {
    let hours: Vec<_> = (15..27)
        .map(|h| {
            serde_json::json!({
                "DateTime": format!("2024-05-{:02}T{:02}:00:00+02:00", 1 + h / 24, h % 24),
                "WeatherIcon": 2,
                "IconPhrase": "Mostly sunny",
                "Temperature": { "Value": 66.0, "Unit": "F", "UnitType": 18 },
                "PrecipitationProbability": 10
            })
        })
        .collect();
    serde_json::Value::Array(hours)
}

async fn mount_weather(server: &MockServer, key: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/currentconditions/v1/{key}")))
        .and(query_param("apikey", "TEST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/forecasts/v1/daily/5day/{key}")))
        .and(query_param("apikey", "TEST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/forecasts/v1/hourly/12hour/{key}")))
        .and(query_param("apikey", "TEST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body()))
        .expect(1)
        .mount(server)
        .await;
}

fn provider_for(server: &MockServer) -> AccuWeatherProvider {
    AccuWeatherProvider::new("TEST".to_string()).unwrap().with_base_url(&server.uri())
}

#[tokio::test]
async fn test_search_cities_parses_candidates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations/v1/cities/search"))
        .and(query_param("q", "Paris"))
        .and(query_param("apikey", "TEST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "Key": "623",
                "EnglishName": "Paris",
                "LocalizedName": "Paris",
                "Country": { "ID": "FR", "EnglishName": "France" },
                "GeoPosition": { "Latitude": 48.857, "Longitude": 2.341 }
            },
            {
                "Key": "351",
                "EnglishName": "Paris",
                "Country": { "ID": "US", "EnglishName": "United States" }
            }
        ])))
        .mount(&mock_server)
        .await;

    let cities = provider_for(&mock_server).search_cities("Paris").await.unwrap();

    assert_eq!(cities.len(), 2);
    assert_eq!(cities[0].key, "623");
    assert_eq!(cities[0].display_name(), "Paris, France");
    assert_eq!(cities[0].country.id.as_deref(), Some("FR"));
    assert!(cities[0].geo_position.is_some());
    assert!(cities[1].geo_position.is_none());
}

#[tokio::test]
async fn test_current_conditions_takes_first_reading() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/623"))
        .and(query_param("metric", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&mock_server)
        .await;

    let weather = provider_for(&mock_server).current_conditions("623").await.unwrap();

    assert_eq!(weather.weather_text, "Partly sunny");
    assert_eq!(weather.weather_icon, Some(3));
    assert_eq!(weather.fahrenheit(), Some(68.0));
}

#[tokio::test]
async fn test_current_conditions_empty_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/623"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server).current_conditions("623").await.unwrap_err();
    assert!(matches!(err, ClientError::Empty { .. }));
}

#[tokio::test]
async fn test_daily_forecast_has_five_days() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/daily/5day/623"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&mock_server)
        .await;

    let forecast = provider_for(&mock_server).daily_forecast("623").await.unwrap();

    assert_eq!(forecast.daily_forecasts.len(), 5);
    let first = &forecast.daily_forecasts[0];
    assert_eq!(first.day.as_ref().map(|d| d.icon_phrase.as_str()), Some("Sunny"));
    assert_eq!(first.temperature.as_ref().map(|t| t.maximum.value), Some(70.0));
    assert!(forecast.headline.is_some());
}

#[tokio::test]
async fn test_hourly_forecast_passes_entries_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/hourly/12hour/623"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body()))
        .mount(&mock_server)
        .await;

    let hourly = provider_for(&mock_server).hourly_forecast("623").await.unwrap();

    assert_eq!(hourly.len(), 12);
    assert_eq!(hourly[0].icon_phrase, "Mostly sunny");
    assert_eq!(hourly[0].precipitation_probability, Some(10));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/623"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Api Authorization failed"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server).current_conditions("623").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(err.to_string().contains("Api Authorization failed"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/daily/5day/623"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server).daily_forecast("623").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn test_dashboard_fetches_everything_for_selected_city() {
    let mock_server = MockServer::start().await;
    mount_weather(&mock_server, "123").await;

    let dashboard =
        Dashboard::new(Arc::new(provider_for(&mock_server)), TemperatureUnit::Celsius);

    dashboard.select_city(City::new("123", "Paris", "France")).settle().await;

    let state = dashboard.snapshot();
    assert_eq!(state.selected_key(), Some("123"));
    assert_eq!(state.display_temperature().temperature, Some(20));
    assert_eq!(state.forecast().map(|f| f.daily_forecasts.len()), Some(5));
    assert_eq!(state.hourly().map(Vec::len), Some(12));
    // `expect(1)` on every mock is verified when the server drops.
}

#[tokio::test]
async fn test_dashboard_keeps_state_when_provider_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dashboard =
        Dashboard::new(Arc::new(provider_for(&mock_server)), TemperatureUnit::Celsius);

    dashboard.select_city(City::new("123", "Paris", "France")).settle().await;

    let state = dashboard.snapshot();
    assert_eq!(state.selected_key(), Some("123"));
    assert!(state.current.is_none());
    assert!(state.forecast.is_none());
    assert!(state.hourly.is_none());
    assert_eq!(state.display_temperature().to_string(), "--°C");
}

fn slow_provider_for(server: &MockServer) -> AccuWeatherProvider {
    provider_for(server).with_timeout(Duration::from_millis(50)).unwrap()
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let err = slow_provider_for(&mock_server).current_conditions("123").await.unwrap_err();

    match err {
        ClientError::Request { what, source } => {
            assert_eq!(what, "current conditions");
            assert!(source.is_timeout(), "expected a timeout, got {source}");
        }
        other => panic!("expected Request error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dashboard_leaves_slot_empty_on_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let dashboard =
        Dashboard::new(Arc::new(slow_provider_for(&mock_server)), TemperatureUnit::Celsius);

    dashboard.select_city(City::new("123", "Paris", "France")).settle().await;

    let state = dashboard.snapshot();
    assert_eq!(state.selected_key(), Some("123"));
    assert!(state.current.is_none());
    assert!(state.forecast.is_none());
    assert!(state.hourly.is_none());
}
