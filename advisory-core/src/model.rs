use serde::{Deserialize, Serialize};

/// Number of columns the classifier expects.
pub const FEATURE_COUNT: usize = 10;

/// Column order of a [`FeatureRecord`] row, fixed by the trained artifact.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "precipitation",
    "temp_max",
    "temp_min",
    "temp_range",
    "wind",
    "precip_rolling_3",
    "precip_rolling_7",
    "wind_rolling_3",
    "month",
    "dayofweek",
];

/// Current conditions for one location, in metric units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// °C
    pub temp_max: f64,
    /// °C
    pub temp_min: f64,
    /// m/s
    pub wind: f64,
    /// mm over the last hour
    pub precipitation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub precipitation: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub temp_range: f64,
    pub wind: f64,
    pub precip_rolling_3: f64,
    pub precip_rolling_7: f64,
    pub wind_rolling_3: f64,
    pub month: u32,
    pub dayofweek: u32,
}

impl FeatureRecord {
    /// Flatten into the column order given by [`FEATURE_NAMES`].
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.precipitation,
            self.temp_max,
            self.temp_min,
            self.temp_range,
            self.wind,
            self.precip_rolling_3,
            self.precip_rolling_7,
            self.wind_rolling_3,
            f64::from(self.month),
            f64::from(self.dayofweek),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RainLabel {
    Clear,
    Rain,
}

impl RainLabel {
    /// Map a raw class id from the model. Class `1` is rain.
    pub fn from_class(class: i32) -> Self {
        if class == 1 { RainLabel::Rain } else { RainLabel::Clear }
    }
}

/// Classifier output for one feature record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: RainLabel,
    /// Confidence for the rain class, in `[0, 1]`.
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub will_rain: bool,
    /// Probability of the predicted outcome, in percent.
    pub probability_percent: f64,
    pub recommendations: Vec<String>,
    pub weather: WeatherReading,
}
