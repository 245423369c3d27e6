use crate::model::{AdvisoryResult, Prediction, RainLabel, WeatherReading};

pub const RAIN_RECOMMENDATIONS: [&str; 4] = [
    "Avoid irrigation today",
    "Delay pesticide spraying",
    "Protect harvested crops",
    "Ensure proper drainage",
];

pub const CLEAR_RECOMMENDATIONS: [&str; 3] = [
    "Safe for irrigation",
    "Fertilizer spraying recommended",
    "Field operations can continue",
];

/// Build the advisory for a prediction.
///
/// `probability_percent` is the probability of the *predicted* outcome: the
/// rain confidence when rain is predicted, its complement otherwise.
pub fn render(reading: &WeatherReading, prediction: &Prediction) -> AdvisoryResult {
    let will_rain = prediction.label == RainLabel::Rain;

    let outcome_probability =
        if will_rain { prediction.probability } else { 1.0 - prediction.probability };

    let recommendations: &[&str] =
        if will_rain { &RAIN_RECOMMENDATIONS } else { &CLEAR_RECOMMENDATIONS };

    AdvisoryResult {
        will_rain,
        probability_percent: (outcome_probability * 100.0).clamp(0.0, 100.0),
        recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
        weather: *reading,
    }
}

impl AdvisoryResult {
    pub fn headline(&self) -> &'static str {
        if self.will_rain { "Rain Expected Tomorrow" } else { "No Rain Expected Tomorrow" }
    }

    pub fn probability_label(&self) -> &'static str {
        if self.will_rain { "Rain Probability" } else { "Clear Weather Probability" }
    }
}
