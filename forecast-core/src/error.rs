use reqwest::StatusCode;
use thiserror::Error;

/// A forecast value that breaks one of the [`WeatherRecord`](crate::WeatherRecord) invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Min temp ({min}) cannot be greater than max temp ({max})")]
    TempRange { min: f64, max: f64 },

    #[error("Humidity ({0}) must be between 0 and 100")]
    Humidity(f64),

    #[error("Wind speed ({0}) cannot be negative")]
    NegativeWindSpeed(f64),
}

/// Everything that can go wrong while fetching one city's forecast.
///
/// These never leave the client: they are logged and turned into
/// [`ForecastResult::Failure`](crate::ForecastResult::Failure).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WeatherAPI forecast request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse WeatherAPI forecast JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WeatherAPI response is missing `{0}`")]
    MissingField(&'static str),

    #[error("Insufficient forecast data: expected 2 days, got {days}")]
    InsufficientData { days: usize },

    #[error("Invalid forecast values: {0}")]
    InvalidRecord(#[from] RecordError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("WEATHER_API_KEY not found in environment, .env file or config file")]
    MissingApiKey,
}
