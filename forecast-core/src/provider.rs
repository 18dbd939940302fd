use crate::model::ForecastResult;
use async_trait::async_trait;
use std::{collections::HashMap, fmt::Debug};

pub mod weatherapi;

/// Source of next-day forecasts.
///
/// Implementations never fail: problems are reported as
/// [`ForecastResult::Failure`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_tomorrow(&self, city: &str) -> ForecastResult;
}

/// Fetch tomorrow's forecast for each city, one request at a time.
pub async fn fetch_all(
    provider: &dyn WeatherProvider,
    cities: &[&str],
) -> HashMap<String, ForecastResult> {
    let mut results = HashMap::with_capacity(cities.len());
    for &city in cities {
        let result = provider.fetch_tomorrow(city).await;
        results.insert(city.to_string(), result);
    }
    results
}
