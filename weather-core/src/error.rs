use thiserror::Error;

pub use reqwest::StatusCode;

/// Failure talking to the weather API.
///
/// A 404 never produces a `ServiceError`: the service maps it to an absent
/// record (current weather) or an empty list (forecast) instead.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The API answered with a non-success status other than 404.
    #[error("weather API request failed with status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// Network-level failure: timeout, DNS, connection refused, or a body
    /// that could not be read.
    #[error("error fetching weather data: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered 2xx but the body was not the expected JSON.
    #[error("failed to decode weather API response: {0}")]
    Decode(#[from] serde_json::Error),
}
