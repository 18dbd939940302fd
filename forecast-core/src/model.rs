use std::cmp::Ordering;

use crate::error::RecordError;

/// Placeholder used when a value is not available.
pub const NOT_AVAILABLE: &str = "N/A";

/// One city's forecast for one day. Only constructible through [`WeatherRecord::new`],
/// so every instance satisfies the temperature, humidity and wind invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    city: String,
    date: String,
    min_temp: f64,
    max_temp: f64,
    humidity: f64,
    wind_speed: f64,
    wind_direction: String,
}

impl WeatherRecord {
    /// Validate and build a record.
    ///
    /// Fails when `min_temp > max_temp`, when `humidity` is outside `0..=100`,
    /// or when `wind_speed` is negative. NaN fails whichever check it is part of.
    pub fn new(
        city: impl Into<String>,
        date: impl Into<String>,
        min_temp: f64,
        max_temp: f64,
        humidity: f64,
        wind_speed: f64,
        wind_direction: impl Into<String>,
    ) -> Result<Self, RecordError> {
        match min_temp.partial_cmp(&max_temp) {
            Some(Ordering::Less | Ordering::Equal) => {}
            _ => return Err(RecordError::TempRange { min: min_temp, max: max_temp }),
        }

        if !(0.0..=100.0).contains(&humidity) {
            return Err(RecordError::Humidity(humidity));
        }

        if wind_speed.is_nan() || wind_speed < 0.0 {
            return Err(RecordError::NegativeWindSpeed(wind_speed));
        }

        Ok(Self {
            city: city.into(),
            date: date.into(),
            min_temp,
            max_temp,
            humidity,
            wind_speed,
            wind_direction: wind_direction.into(),
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Degrees Celsius.
    pub fn min_temp(&self) -> f64 {
        self.min_temp
    }

    /// Degrees Celsius.
    pub fn max_temp(&self) -> f64 {
        self.max_temp
    }

    /// Percent.
    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    /// Kilometres per hour.
    pub fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    /// Compass direction such as `"NE"`, or [`NOT_AVAILABLE`].
    pub fn wind_direction(&self) -> &str {
        &self.wind_direction
    }
}

/// Outcome of a single city's forecast request.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastResult {
    Success(WeatherRecord),
    Failure(String),
}

impl ForecastResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ForecastResult::Success(_))
    }

    pub fn record(&self) -> Option<&WeatherRecord> {
        match self {
            ForecastResult::Success(record) => Some(record),
            ForecastResult::Failure(_) => None,
        }
    }
}
