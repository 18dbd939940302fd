use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::{
    error::FetchError,
    model::{ForecastResult, NOT_AVAILABLE, WeatherRecord},
};

use super::WeatherProvider;

pub const FORECAST_URL: &str = "https://api.weatherapi.com/v1/forecast.json";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Today plus tomorrow.
const FORECAST_DAYS: &str = "2";

/// WeatherAPI.com forecast client.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, FORECAST_URL)
    }

    /// Same as [`WeatherApiProvider::new`] but sends requests to `base_url`
    /// instead of the public endpoint.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { api_key, base_url: base_url.into(), http })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn try_fetch_tomorrow(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        debug!(city, "Requesting forecast");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("days", FORECAST_DAYS),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WaForecastResponse = serde_json::from_str(&body)?;
        tomorrow_record(city, parsed)
    }
}

/// Pull day two out of a forecast response and validate it.
fn tomorrow_record(city: &str, parsed: WaForecastResponse) -> Result<WeatherRecord, FetchError> {
    let mut days = parsed.forecast.map(|f| f.forecastday).unwrap_or_default();
    if days.len() < 2 {
        return Err(FetchError::InsufficientData { days: days.len() });
    }

    let tomorrow = days.swap_remove(1);
    let date = tomorrow.date.ok_or(FetchError::MissingField("forecastday.date"))?;
    let day = tomorrow.day.ok_or(FetchError::MissingField("forecastday.day"))?;

    let min_temp = day.mintemp_c.ok_or(FetchError::MissingField("day.mintemp_c"))?;
    let max_temp = day.maxtemp_c.ok_or(FetchError::MissingField("day.maxtemp_c"))?;
    let humidity = day.avghumidity.ok_or(FetchError::MissingField("day.avghumidity"))?;
    let wind_speed = day.maxwind_kph.ok_or(FetchError::MissingField("day.maxwind_kph"))?;

    // Direction is sampled from the middle hour of the day.
    let hours = tomorrow.hour.unwrap_or_default();
    let wind_direction = match hours.get(hours.len() / 2) {
        Some(hour) => hour.wind_dir.clone().ok_or(FetchError::MissingField("hour.wind_dir"))?,
        None => NOT_AVAILABLE.to_string(),
    };

    let record =
        WeatherRecord::new(city, date, min_temp, max_temp, humidity, wind_speed, wind_direction)?;
    Ok(record)
}

#[derive(Debug, Deserialize)]
struct WaDay {
    mintemp_c: Option<f64>,
    maxtemp_c: Option<f64>,
    avghumidity: Option<f64>,
    maxwind_kph: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WaHour {
    wind_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: Option<String>,
    day: Option<WaDay>,
    hour: Option<Vec<WaHour>>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    #[serde(default)]
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    forecast: Option<WaForecast>,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn fetch_tomorrow(&self, city: &str) -> ForecastResult {
        match self.try_fetch_tomorrow(city).await {
            Ok(record) => ForecastResult::Success(record),
            Err(err) => {
                error!(city, error = %err, "Error requesting data for city");
                ForecastResult::Failure(err.to_string())
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
