use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{WeatherError, WeatherReading};

use super::WeatherProvider;

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, CURRENT_WEATHER_URL.to_string(), timeout)
    }

    /// Point the provider at another endpoint (a mock server in tests).
    pub fn with_base_url(
        api_key: String,
        url: String,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { api_key, url, http })
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp_max: f64,
    temp_min: f64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    wind: OwWind,
    rain: Option<OwRain>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

impl From<OwCurrentResponse> for WeatherReading {
    fn from(parsed: OwCurrentResponse) -> Self {
        WeatherReading {
            temp_max: parsed.main.temp_max,
            temp_min: parsed.main.temp_min,
            wind: parsed.wind.speed,
            precipitation: parsed.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, location: &str) -> Result<WeatherReading, WeatherError> {
        debug!(location, "requesting current weather from OpenWeather");

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = provider_message(&body);
            warn!(status = status.as_u16(), %message, "OpenWeather rejected the request");
            return Err(WeatherError::Provider { status: status.as_u16(), message });
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|cause| WeatherError::Malformed { cause })?;

        Ok(parsed.into())
    }
}

/// Pull `message` out of an error body, falling back to a generic text.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| "Unknown error".to_string())
}
