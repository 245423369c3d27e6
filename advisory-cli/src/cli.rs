use std::{path::PathBuf, sync::Arc};

use advisory_core::{
    Config, ModelArtifact, Pipeline, RainClassifier, provider::provider_from_config,
};
use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Text};
use tracing::info;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "rain-advisory", version, about = "Real-time rain advisory for farmers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Fetch current weather and show the rain advisory.
    Advise {
        /// Location as "City,CountryCode". Prompts interactively when absent.
        location: Option<String>,

        /// Path to the classifier artifact.
        #[arg(long)]
        model: Option<PathBuf>,

        /// Print the advisory as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Advise { location, model, json } => advise(location, model, json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn advise(location: Option<String>, model: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?.with_env();

    // Startup checks: both are fatal and happen before any request.
    let api_key = config.require_api_key()?;
    let model_path = model.unwrap_or_else(|| config.model_path());
    let classifier: Arc<dyn RainClassifier> = Arc::new(ModelArtifact::load(&model_path)?);

    let provider = provider_from_config(api_key, &config)?;
    let pipeline = Pipeline::new(provider, classifier);
    info!(model = %model_path.display(), "ready to serve advisories");

    match location {
        Some(location) => {
            let now = Local::now();
            let result = pipeline.run_at(&location, now).await?;
            output::print(&result, now, json)
        }
        None => interactive(&pipeline, config.default_location(), json).await,
    }
}

/// Prompt for locations until the user stops; fetch errors are shown, not fatal.
async fn interactive(pipeline: &Pipeline, default_location: &str, json: bool) -> anyhow::Result<()> {
    loop {
        let location = Text::new("City Name (use format: City,CountryCode)")
            .with_default(default_location)
            .prompt()
            .context("Failed to read location")?;

        let now = Local::now();
        match pipeline.run_at(&location, now).await {
            Ok(result) => output::print(&result, now, json)?,
            Err(err) => eprintln!("{}", output::error_line(&err)),
        }

        let again = Confirm::new("Check another location?")
            .with_default(false)
            .prompt()
            .context("Failed to read answer")?;

        if !again {
            return Ok(());
        }
    }
}
