use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{config::Settings, error::ServiceError, model::WeatherRecord};

use super::WeatherService;

/// One attempt per call, no retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// OpenWeatherMap client for current conditions and the 5-day/3-hour
/// forecast.
///
/// Requests carry no `units` parameter, so temperatures come back in Kelvin
/// and are converted locally before anything else sees them.
#[derive(Debug, Clone)]
pub struct OpenWeatherService {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Shared request discipline for both endpoints: 404 is `Ok(None)`,
    /// any other non-success status is an error carrying the (truncated)
    /// response body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<Option<T>, ServiceError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%city, endpoint, "requesting weather data");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        // The absent-vs-error decision is made on the response status
        // itself, before any error conversion.
        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%city, endpoint, "city not known to the weather API");
            return Ok(None);
        }

        let body = res.text().await?;
        if !status.is_success() {
            return Err(ServiceError::UnexpectedStatus { status, body: truncate_body(&body) });
        }

        Ok(Some(serde_json::from_str(&body)?))
    }
}

#[async_trait]
impl WeatherService for OpenWeatherService {
    async fn fetch_current_weather(
        &self,
        city: &str,
    ) -> Result<Option<WeatherRecord>, ServiceError> {
        let parsed: Option<CurrentResponse> = self.get_json("weather", city).await?;
        Ok(parsed.map(CurrentResponse::into_record))
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Vec<WeatherRecord>, ServiceError> {
        let parsed: Option<ForecastResponse> = self.get_json("forecast", city).await?;
        Ok(parsed.map(ForecastResponse::into_records).unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ApiWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    dt: i64,
    main: ApiMain,
    weather: Vec<ApiWeather>,
    wind: ApiWind,
}

impl CurrentResponse {
    fn into_record(self) -> WeatherRecord {
        WeatherRecord {
            city_name: self.name,
            temperature_c: kelvin_to_celsius(self.main.temp),
            condition: condition_text(&self.weather),
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            timestamp: unix_to_utc(self.dt),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: ApiMain,
    weather: Vec<ApiWeather>,
    wind: ApiWind,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    city: ApiCity,
    list: Vec<ForecastEntry>,
}

impl ForecastResponse {
    /// Every entry carries the city name from the response's nested `city`
    /// field, never a per-entry field.
    fn into_records(self) -> Vec<WeatherRecord> {
        let city_name = self.city.name;

        self.list
            .into_iter()
            .map(|entry| WeatherRecord {
                city_name: city_name.clone(),
                temperature_c: kelvin_to_celsius(entry.main.temp),
                condition: condition_text(&entry.weather),
                humidity_pct: entry.main.humidity,
                wind_speed_mps: entry.wind.speed,
                timestamp: unix_to_utc(entry.dt),
            })
            .collect()
    }
}

/// Kelvin to Celsius, rounded to one decimal place.
fn kelvin_to_celsius(kelvin: f64) -> f64 {
    ((kelvin - 273.15) * 10.0).round() / 10.0
}

fn condition_text(weather: &[ApiWeather]) -> String {
    weather.first().map(|w| w.description.clone()).unwrap_or_else(|| "Unknown".to_string())
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
