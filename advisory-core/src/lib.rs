//! Core library for the `rain-advisory` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeather implementation
//! - Feature building, classifier inference and advisory rendering
//! - The pipeline that wires them into one request
//!
//! It is used by `advisory-cli`, but can also be reused by other binaries or services.

pub mod advisory;
pub mod classifier;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use classifier::{ArtifactClassifier, ModelArtifact, RainClassifier};
pub use config::Config;
pub use error::{ConfigError, ModelLoadError, PipelineError, WeatherError};
pub use model::{AdvisoryResult, FeatureRecord, Prediction, RainLabel, WeatherReading};
pub use pipeline::Pipeline;
pub use provider::WeatherProvider;
