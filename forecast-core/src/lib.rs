//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - API key resolution (environment, `.env`, config file)
//! - The WeatherAPI.com client and the provider abstraction over it
//! - The validated forecast model
//! - Table rendering of per-city results

pub mod config;
pub mod dotenv;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{ConfigError, FetchError, RecordError};
pub use format::{CITIES, render};
pub use model::{ForecastResult, NOT_AVAILABLE, WeatherRecord};
pub use provider::{WeatherProvider, fetch_all, weatherapi::WeatherApiProvider};
