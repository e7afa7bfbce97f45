//! Artifact Loader
//!
//! Loads the column schema, scaler and classifier from JSON files and checks
//! they agree with each other. The resulting `ModelContext` is immutable and
//! shared read-only by every request.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::features::{
    encode_detailed, EncodedVector, ExpectedColumns, Projection, RawInput, SchemaError,
};
use super::model::{predict, Classifier, ClassifierModel, InferenceError, PredictionResult, StandardScaler};

pub const DEFAULT_MODEL_FILE: &str = "heart_model.json";
pub const DEFAULT_SCALER_FILE: &str = "heart_scaler.json";
pub const DEFAULT_COLUMNS_FILE: &str = "heart_columns.json";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid column schema in {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("invalid model in {}: {source}", .path.display())]
    Model {
        path: PathBuf,
        #[source]
        source: InferenceError,
    },

    #[error("{artifact} expects {actual} features but the column schema has {expected}")]
    Mismatch {
        artifact: &'static str,
        expected: usize,
        actual: usize,
    },
}

// ============================================================================
// PATHS
// ============================================================================

/// Locations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub columns: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(DEFAULT_MODEL_FILE),
            scaler: dir.join(DEFAULT_SCALER_FILE),
            columns: dir.join(DEFAULT_COLUMNS_FILE),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing { path: path.to_path_buf() });
    }

    let data = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&data).map_err(|source| ArtifactError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// MODEL CONTEXT
// ============================================================================

/// Loaded, cross-checked artifacts
#[derive(Debug)]
pub struct ModelContext {
    columns: ExpectedColumns,
    scaler: StandardScaler,
    classifier: ClassifierModel,
    loaded_at: DateTime<Utc>,
}

impl ModelContext {
    /// Assemble a context from already-decoded artifacts
    pub fn new(
        columns: ExpectedColumns,
        scaler: StandardScaler,
        classifier: ClassifierModel,
    ) -> Result<Self, ArtifactError> {
        if scaler.n_features() != columns.len() {
            return Err(ArtifactError::Mismatch {
                artifact: "scaler",
                expected: columns.len(),
                actual: scaler.n_features(),
            });
        }
        if classifier.n_features() != columns.len() {
            return Err(ArtifactError::Mismatch {
                artifact: "classifier",
                expected: columns.len(),
                actual: classifier.n_features(),
            });
        }

        Ok(Self {
            columns,
            scaler,
            classifier,
            loaded_at: Utc::now(),
        })
    }

    /// Load and validate all three artifacts
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        tracing::info!("Loading column schema from {}", paths.columns.display());
        let names: Vec<String> = read_json(&paths.columns)?;
        let columns = ExpectedColumns::new(names).map_err(|source| ArtifactError::Schema {
            path: paths.columns.clone(),
            source,
        })?;

        tracing::info!("Loading scaler from {}", paths.scaler.display());
        let scaler: StandardScaler = read_json(&paths.scaler)?;
        scaler.validate().map_err(|source| ArtifactError::Model {
            path: paths.scaler.clone(),
            source,
        })?;

        tracing::info!("Loading classifier from {}", paths.model.display());
        let classifier: ClassifierModel = read_json(&paths.model)?;
        classifier.validate().map_err(|source| ArtifactError::Model {
            path: paths.model.clone(),
            source,
        })?;

        let context = Self::new(columns, scaler, classifier)?;

        tracing::info!(
            classifier = context.classifier.name(),
            columns = context.columns.len(),
            schema = %format!("{:08x}", context.columns.fingerprint()),
            "Model artifacts loaded"
        );

        Ok(context)
    }

    pub fn columns(&self) -> &ExpectedColumns {
        &self.columns
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &ClassifierModel {
        &self.classifier
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Score a vector already encoded against this context's schema
    pub fn predict_vector(&self, vector: &EncodedVector) -> Result<PredictionResult, InferenceError> {
        if !vector.matches(&self.columns) {
            return Err(InferenceError::SchemaMismatch {
                expected: self.columns.fingerprint(),
                actual: vector.schema_fingerprint,
            });
        }
        predict(vector, &self.scaler, &self.classifier)
    }

    /// Encode and score one input
    pub fn evaluate(&self, raw: &RawInput) -> Result<(PredictionResult, Projection), InferenceError> {
        let projection = encode_detailed(raw, &self.columns);
        let result = self.predict_vector(&projection.vector)?;
        Ok((result, projection))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::{encode, ChestPainType, ExerciseAngina, RestingEcg, Sex, StSlope};
    use crate::logic::model::{KNeighborsClassifier, LogisticClassifier, RiskLabel};

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn write_valid(dir: &Path) {
        write(dir, DEFAULT_COLUMNS_FILE, r#"["Age", "Sex_M", "Sex_F"]"#);
        write(dir, DEFAULT_SCALER_FILE, r#"{"mean": [50.0, 0.5, 0.5], "scale": [10.0, 0.5, 0.5]}"#);
        write(
            dir,
            DEFAULT_MODEL_FILE,
            r#"{"kind": "knn", "k": 1, "x_train": [[-1.0, 1.0, -1.0], [1.0, -1.0, 1.0]], "y_train": [0, 1]}"#,
        );
    }

    fn input(age: u32, sex: Sex) -> RawInput {
        RawInput {
            age,
            sex,
            chest_pain_type: ChestPainType::Ata,
            resting_bp: 120,
            cholesterol: 200,
            fasting_bs: false,
            resting_ecg: RestingEcg::Normal,
            max_hr: 150,
            exercise_angina: ExerciseAngina::No,
            oldpeak: 1.0,
            st_slope: StSlope::Up,
        }
    }

    #[test]
    fn test_load_valid_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());

        let context = ModelContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap();
        assert_eq!(context.columns().len(), 3);
        assert_eq!(context.classifier().name(), "knn");

        let (result, projection) = context.evaluate(&input(60, Sex::Female)).unwrap();
        assert_eq!(result.label, RiskLabel::HighRisk);
        assert_eq!(projection.vector.values, vec![60.0, 0.0, 1.0]);

        let (result, _) = context.evaluate(&input(40, Sex::Male)).unwrap();
        assert_eq!(result.label, RiskLabel::LowRisk);
    }

    #[test]
    fn test_bundled_artifacts_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts");
        let context = ModelContext::load(&ArtifactPaths::in_dir(dir)).unwrap();
        assert_eq!(context.columns().len(), 20);

        let (result, projection) = context.evaluate(&input(40, Sex::Male)).unwrap();
        assert!(!projection.has_dropped());
        assert!((0.0..=100.0).contains(&result.risk_percent));

        let (again, _) = context.evaluate(&input(40, Sex::Male)).unwrap();
        assert_eq!(result, again);
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());
        fs::remove_file(dir.path().join(DEFAULT_SCALER_FILE)).unwrap();

        let err = ModelContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing { ref path } if path.ends_with(DEFAULT_SCALER_FILE)));
        assert!(err.to_string().contains(DEFAULT_SCALER_FILE));
    }

    #[test]
    fn test_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());
        write(dir.path(), DEFAULT_MODEL_FILE, "not json");

        let err = ModelContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ArtifactError::Decode { .. }));
    }

    #[test]
    fn test_duplicate_columns() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());
        write(dir.path(), DEFAULT_COLUMNS_FILE, r#"["Age", "Age", "Sex_F"]"#);

        let err = ModelContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::Schema { source: SchemaError::Duplicate { .. }, .. }
        ));
    }

    #[test]
    fn test_invalid_model_parameters() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());
        write(
            dir.path(),
            DEFAULT_MODEL_FILE,
            r#"{"kind": "knn", "k": 5, "x_train": [[0.0, 0.0, 0.0]], "y_train": [0]}"#,
        );

        let err = ModelContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ArtifactError::Model { .. }));
    }

    #[test]
    fn test_scaler_width_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());
        write(dir.path(), DEFAULT_SCALER_FILE, r#"{"mean": [0.0, 0.0], "scale": [1.0, 1.0]}"#);

        let err = ModelContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::Mismatch { artifact: "scaler", expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn test_classifier_width_mismatch() {
        let columns = ExpectedColumns::new(["Age", "MaxHR"]).unwrap();
        let classifier = ClassifierModel::Logistic(LogisticClassifier::new(vec![1.0], 0.0).unwrap());
        let err = ModelContext::new(columns, StandardScaler::identity(2), classifier).unwrap_err();
        assert!(matches!(err, ArtifactError::Mismatch { artifact: "classifier", .. }));
    }

    #[test]
    fn test_vector_from_other_schema_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());
        let context = ModelContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap();

        // Same width, different column order
        let reordered = ExpectedColumns::new(["Age", "Sex_F", "Sex_M"]).unwrap();
        let vector = encode(&input(60, Sex::Female), &reordered);
        assert_eq!(vector.len(), context.columns().len());

        let err = context.predict_vector(&vector).unwrap_err();
        assert_eq!(
            err,
            InferenceError::SchemaMismatch {
                expected: context.columns().fingerprint(),
                actual: reordered.fingerprint(),
            }
        );

        let own = encode(&input(60, Sex::Female), context.columns());
        assert!(context.predict_vector(&own).is_ok());
    }

    #[test]
    fn test_context_new() {
        let columns = ExpectedColumns::new(["Age"]).unwrap();
        let classifier = ClassifierModel::Knn(
            KNeighborsClassifier::new(1, vec![vec![0.0]], vec![1]).unwrap(),
        );
        let context = ModelContext::new(columns, StandardScaler::identity(1), classifier).unwrap();
        assert!(context.loaded_at() <= Utc::now());
        assert_eq!(context.scaler().n_features(), 1);
    }
}
