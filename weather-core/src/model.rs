use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weather observation or forecast point for a city.
///
/// Temperatures are stored already converted to Celsius, rounded to one
/// decimal place; wind speed is in meters per second. The timestamp is
/// absent when the source did not carry a representable observation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city_name: String,
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub timestamp: Option<DateTime<Utc>>,
}
