//! Inference over the pre-trained rain classifier.
//!
//! The artifact is loaded once at startup, validated against the fixed
//! feature schema and then only read.

use std::{fmt::Debug, fs, path::Path};

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::LogisticRegression;
use tracing::{debug, info};

use crate::{
    ModelLoadError,
    model::{FEATURE_COUNT, FEATURE_NAMES, FeatureRecord, Prediction, RainLabel},
};

pub type RainModel = LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>>;

pub trait RainClassifier: Send + Sync + Debug {
    fn predict(&self, features: &FeatureRecord) -> RainLabel;

    /// `[P(clear), P(rain)]`
    fn predict_proba(&self, features: &FeatureRecord) -> [f64; 2];
}

/// Score one record: label from `predict`, rain confidence from `predict_proba`.
pub fn score(classifier: &dyn RainClassifier, features: &FeatureRecord) -> Prediction {
    let label = classifier.predict(features);
    let probability = classifier.predict_proba(features)[1];
    debug!(?label, probability, "scored feature record");
    Prediction { label, probability }
}

/// On-disk form of the classifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub model: RainModel,
}

impl ModelArtifact {
    pub fn new(model: RainModel) -> Self {
        Self { feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(), model }
    }

    /// Read, parse and validate an artifact.
    pub fn load(path: &Path) -> Result<ArtifactClassifier, ModelLoadError> {
        if !path.exists() {
            return Err(ModelLoadError::Missing { path: path.to_path_buf() });
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| ModelLoadError::Read { path: path.to_path_buf(), source })?;

        let parse_err = |source| ModelLoadError::Parse { path: path.to_path_buf(), source };
        let schema_err = |reason| ModelLoadError::Schema { path: path.to_path_buf(), reason };

        let value: serde_json::Value = serde_json::from_str(&contents).map_err(parse_err)?;
        require_fitted(&value).map_err(schema_err)?;
        let artifact: ModelArtifact = serde_json::from_value(value).map_err(parse_err)?;

        let classifier = artifact.into_classifier().map_err(schema_err)?;

        info!(path = %path.display(), "loaded rain classifier");
        Ok(classifier)
    }

    fn into_classifier(self) -> Result<ArtifactClassifier, String> {
        if self.feature_names != FEATURE_NAMES {
            return Err(format!(
                "expected features {:?}, artifact declares {:?}",
                FEATURE_NAMES, self.feature_names
            ));
        }

        if !self.model.classes().iter().copied().eq([0, 1]) {
            return Err(format!(
                "expected classes [0, 1], artifact was trained on {:?}",
                self.model.classes()
            ));
        }

        let coefficients = binary_coefficients(self.model.coefficients())?;
        let intercept = *self.model.intercept().get((0, 0));

        Ok(ArtifactClassifier { model: self.model, coefficients, intercept })
    }
}

/// smartcore unwraps these on access, so an unfitted model must be caught first.
fn require_fitted(value: &serde_json::Value) -> Result<(), String> {
    for field in ["coefficients", "intercept", "classes"] {
        if value["model"][field].is_null() {
            return Err(format!("model has no {field}"));
        }
    }
    Ok(())
}

/// Extract the single 1xN weight row of a binary model.
fn binary_coefficients(weights: &DenseMatrix<f64>) -> Result<[f64; FEATURE_COUNT], String> {
    let (rows, cols) = weights.shape();
    let mut out = [0.0; FEATURE_COUNT];

    if (rows, cols) != (1, FEATURE_COUNT) {
        return Err(format!(
            "expected a binary model over {FEATURE_COUNT} features, got {rows}x{cols} coefficients"
        ));
    }

    for (j, w) in out.iter_mut().enumerate() {
        *w = *weights.get((0, j));
    }

    Ok(out)
}

/// A validated artifact, ready for inference.
#[derive(Debug)]
pub struct ArtifactClassifier {
    model: RainModel,
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl RainClassifier for ArtifactClassifier {
    fn predict(&self, features: &FeatureRecord) -> RainLabel {
        let row = features.to_row().to_vec();
        // Column count was checked at load time, so a failure here is a bug.
        let x = DenseMatrix::from_2d_vec(&vec![row])
            .unwrap_or_else(|e| panic!("feature row does not form a matrix: {e}"));
        let classes = self
            .model
            .predict(&x)
            .unwrap_or_else(|e| panic!("classifier rejected a schema-valid row: {e}"));

        match classes.first() {
            Some(class) => RainLabel::from_class(*class),
            None => panic!("classifier returned no prediction for one row"),
        }
    }

    fn predict_proba(&self, features: &FeatureRecord) -> [f64; 2] {
        let z = features
            .to_row()
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (x, w)| acc + x * w);
        let rain = 1.0 / (1.0 + (-z).exp());
        [1.0 - rain, rain]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(precipitation: f64, temp_max: f64, temp_min: f64, wind: f64) -> FeatureRecord {
        FeatureRecord {
            precipitation,
            temp_max,
            temp_min,
            temp_range: temp_max - temp_min,
            wind,
            precip_rolling_3: precipitation,
            precip_rolling_7: precipitation,
            wind_rolling_3: wind,
            month: 7,
            dayofweek: 2,
        }
    }

    fn trained_model() -> RainModel {
        trained_model_with_labels([0, 1])
    }

    fn trained_model_with_labels([clear, rain]: [i32; 2]) -> RainModel {
        let samples = vec![
            record(0.0, 35.0, 25.0, 2.0),
            record(0.0, 33.0, 22.0, 1.5),
            record(0.2, 31.0, 23.0, 2.5),
            record(0.0, 36.0, 24.0, 3.0),
            record(6.0, 27.0, 23.0, 6.0),
            record(8.5, 26.0, 22.5, 5.5),
            record(4.0, 28.0, 24.0, 7.0),
            record(12.0, 25.0, 21.0, 8.0),
        ];
        let rows: Vec<Vec<f64>> = samples.iter().map(|r| r.to_row().to_vec()).collect();
        let x = DenseMatrix::from_2d_vec(&rows).unwrap();
        let y: Vec<i32> = vec![clear, clear, clear, clear, rain, rain, rain, rain];
        LogisticRegression::fit(&x, &y, Default::default()).unwrap()
    }

    fn write_artifact(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn loaded_classifier() -> ArtifactClassifier {
        let json = serde_json::to_string(&ModelArtifact::new(trained_model())).unwrap();
        let file = write_artifact(&json);
        ModelArtifact::load(file.path()).unwrap()
    }

    #[test]
    fn loads_artifact_and_scores_consistently() {
        let classifier = loaded_classifier();

        for features in [record(0.0, 34.0, 24.0, 2.0), record(10.0, 26.0, 22.0, 7.5)] {
            let [clear, rain] = classifier.predict_proba(&features);
            assert!((0.0..=1.0).contains(&rain));
            assert!((clear + rain - 1.0).abs() < 1e-12);

            let prediction = score(&classifier, &features);
            assert_eq!(prediction.probability, rain);
            assert_eq!(prediction.label == RainLabel::Rain, rain > 0.5);
        }
    }

    #[test]
    fn missing_artifact_is_reported() {
        let err = ModelArtifact::load(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ModelLoadError::Missing { .. }));
    }

    #[test]
    fn corrupt_artifact_is_reported() {
        let file = write_artifact("{ this is not json");
        let err = ModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Parse { .. }));
    }

    #[test]
    fn feature_name_mismatch_is_reported() {
        let mut artifact = ModelArtifact::new(trained_model());
        artifact.feature_names.swap(0, 1);
        let file = write_artifact(&serde_json::to_string(&artifact).unwrap());

        let err = ModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Schema { .. }));
    }

    #[test]
    fn labels_other_than_zero_and_one_are_rejected() {
        let artifact = ModelArtifact::new(trained_model_with_labels([1, 2]));
        let file = write_artifact(&serde_json::to_string(&artifact).unwrap());

        let err = ModelArtifact::load(file.path()).unwrap_err();
        match err {
            ModelLoadError::Schema { reason, .. } => assert!(reason.contains("classes")),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn unfitted_model_fields_are_rejected_without_panicking() {
        for field in ["coefficients", "intercept", "classes"] {
            let artifact = ModelArtifact::new(trained_model());
            let mut value = serde_json::to_value(&artifact).unwrap();
            value["model"][field] = serde_json::Value::Null;
            let file = write_artifact(&value.to_string());

            let err = ModelArtifact::load(file.path()).unwrap_err();
            match err {
                ModelLoadError::Schema { reason, .. } => assert!(reason.contains(field)),
                other => panic!("expected schema error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn column_shaped_coefficients_are_rejected() {
        let weights = DenseMatrix::from_2d_vec(&vec![vec![0.1]; FEATURE_COUNT]).unwrap();
        assert!(binary_coefficients(&weights).is_err());
    }

    #[test]
    fn wrong_coefficient_shape_is_rejected() {
        let weights = DenseMatrix::from_2d_vec(&vec![vec![0.1, 0.2, 0.3]]).unwrap();
        assert!(binary_coefficients(&weights).is_err());
    }
}
