use std::path::PathBuf;

use thiserror::Error;

/// Startup configuration problems. Fatal: nothing is served without a key.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "OpenWeather API key not found.\n\
         Hint: set OPENWEATHER_API_KEY (a .env file works) or run `rain-advisory configure`."
    )]
    MissingApiKey,
}

/// Failures while loading the classifier artifact. Fatal at startup.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Model artifact not found at {}", path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read model artifact {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model artifact {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model artifact {} does not match the feature schema: {reason}", path.display())]
    Schema { path: PathBuf, reason: String },
}

/// Per-request weather fetch failures. Recoverable: the user may simply retry.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider answered with a non-success status.
    #[error("API Error: {message}")]
    Provider { status: u16, message: String },

    /// Timeout, DNS failure, connection reset and friends.
    #[error("Request failed: {cause}")]
    Transport {
        #[source]
        cause: reqwest::Error,
    },

    #[error("Request failed: unexpected weather payload: {cause}")]
    Malformed {
        #[source]
        cause: serde_json::Error,
    },
}

impl From<reqwest::Error> for WeatherError {
    /// The request URL carries the API key, so it never leaves this crate.
    fn from(cause: reqwest::Error) -> Self {
        WeatherError::Transport { cause: cause.without_url() }
    }
}

/// Errors surfaced by a single pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Weather(#[from] WeatherError),
}
