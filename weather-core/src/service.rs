use async_trait::async_trait;

use crate::{error::ServiceError, model::WeatherRecord};

pub mod openweather;

pub use openweather::OpenWeatherService;

/// Weather backend consumed by the display layer.
///
/// "City not found" is an absent result, not an error: only transport
/// problems, decode failures, and non-404 error statuses surface as
/// [`ServiceError`].
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Current conditions for a city, or `None` when the city is unknown.
    async fn fetch_current_weather(
        &self,
        city: &str,
    ) -> Result<Option<WeatherRecord>, ServiceError>;

    /// 5-day forecast at 3-hour intervals, ordered by time. Empty when the
    /// city is unknown.
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<WeatherRecord>, ServiceError>;
}
