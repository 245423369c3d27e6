use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, info, warn};

use crate::{
    AdvisoryResult, PipelineError, advisory,
    classifier::{self, RainClassifier},
    features,
    provider::WeatherProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Fetching,
    Scoring,
    Rendering,
    Done,
    Failed,
}

/// Fetch -> features -> inference -> advisory, one request at a time.
#[derive(Debug)]
pub struct Pipeline {
    provider: Box<dyn WeatherProvider>,
    classifier: Arc<dyn RainClassifier>,
}

impl Pipeline {
    pub fn new(provider: Box<dyn WeatherProvider>, classifier: Arc<dyn RainClassifier>) -> Self {
        Self { provider, classifier }
    }

    pub async fn run(&self, location: &str) -> Result<AdvisoryResult, PipelineError> {
        self.run_at(location, Local::now()).await
    }

    /// Same as [`Pipeline::run`] with an explicit clock reading.
    pub async fn run_at<Tz: TimeZone>(
        &self,
        location: &str,
        now: DateTime<Tz>,
    ) -> Result<AdvisoryResult, PipelineError> {
        let mut stage = PipelineStage::Idle;
        advance(&mut stage, PipelineStage::Fetching);

        let reading = match self.provider.fetch(location).await {
            Ok(reading) => reading,
            Err(err) => {
                advance(&mut stage, PipelineStage::Failed);
                warn!(location, error = %err, "weather fetch failed");
                return Err(err.into());
            }
        };

        advance(&mut stage, PipelineStage::Scoring);
        let record = features::build(&reading, &now);
        let prediction = classifier::score(self.classifier.as_ref(), &record);

        advance(&mut stage, PipelineStage::Rendering);
        let result = advisory::render(&reading, &prediction);

        advance(&mut stage, PipelineStage::Done);
        info!(location, will_rain = result.will_rain, "advisory ready");
        Ok(result)
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    debug!(from = ?*stage, to = ?next, "pipeline stage");
    *stage = next;
}
