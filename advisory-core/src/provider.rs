use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;

use crate::{Config, WeatherError, WeatherReading, provider::openweather::OpenWeatherProvider};

pub mod openweather;

/// Bound on a single weather request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for a `"City,CountryCode"` location.
    ///
    /// The location is passed through untouched; the provider reports its own
    /// error for names it cannot resolve.
    async fn fetch(&self, location: &str) -> Result<WeatherReading, WeatherError>;
}

/// Construct the OpenWeather provider from an already resolved API key.
pub fn provider_from_config(
    api_key: &str,
    config: &Config,
) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let timeout = config.timeout();
    let provider = OpenWeatherProvider::new(api_key.to_owned(), timeout)?;
    Ok(Box::new(provider))
}
