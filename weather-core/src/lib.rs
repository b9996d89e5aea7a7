//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The weather-service abstraction and its OpenWeatherMap implementation
//! - The shared domain model ([`WeatherRecord`])
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod service;

pub use config::{Config, Settings};
pub use error::{ServiceError, StatusCode};
pub use model::WeatherRecord;
pub use service::{OpenWeatherService, WeatherService};
