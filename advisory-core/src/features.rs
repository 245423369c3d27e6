use chrono::Datelike;

use crate::model::{FeatureRecord, WeatherReading};

/// Turn a reading plus the current date into the classifier's feature row.
///
/// No history is available at inference time, so the rolling columns repeat
/// the instantaneous precipitation and wind. The artifact was trained with
/// `dayofweek` counted from Monday = 0.
pub fn build<D: Datelike>(reading: &WeatherReading, now: &D) -> FeatureRecord {
    FeatureRecord {
        precipitation: reading.precipitation,
        temp_max: reading.temp_max,
        temp_min: reading.temp_min,
        temp_range: reading.temp_max - reading.temp_min,
        wind: reading.wind,
        precip_rolling_3: reading.precipitation,
        precip_rolling_7: reading.precipitation,
        wind_rolling_3: reading.wind,
        month: now.month(),
        dayofweek: now.weekday().num_days_from_monday(),
    }
}
