//! Inference Engine
//!
//! Scaler then classifier over one encoded vector. Pure and deterministic:
//! the same vector and artifacts always give the same label and score.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::features::EncodedVector;
use super::knn::KNeighborsClassifier;
use super::logistic::LogisticClassifier;
use super::scaler::StandardScaler;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("{component} expects {expected} features but the vector has {actual}")]
    DimensionMismatch {
        component: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("feature {index} is not finite after scaling")]
    NonFinite { index: usize },

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("classifier returned invalid probabilities ({negative}, {positive})")]
    InvalidOutput { negative: f64, positive: f64 },

    #[error("vector was encoded for schema {actual:08x}, model expects {expected:08x}")]
    SchemaMismatch { expected: u32, actual: u32 },
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Class-membership probabilities for the binary problem
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub negative: f64,
    pub positive: f64,
}

impl ClassProbabilities {
    pub fn new(negative: f64, positive: f64) -> Self {
        Self { negative, positive }
    }

    /// Both finite, in [0, 1] and summing to 1
    pub fn is_valid(&self) -> bool {
        let in_unit = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        in_unit(self.negative)
            && in_unit(self.positive)
            && (self.negative + self.positive - 1.0).abs() < 1e-6
    }

    /// Argmax, ties to the negative class
    pub fn label(&self) -> RiskLabel {
        if self.positive > self.negative {
            RiskLabel::HighRisk
        } else {
            RiskLabel::LowRisk
        }
    }
}

/// Binary classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "Low Risk")]
    LowRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::LowRisk => "Low Risk",
            RiskLabel::HighRisk => "High Risk",
        }
    }
}

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: RiskLabel,
    /// Positive-class probability, 0.0 - 1.0
    pub probability: f64,
    /// Positive-class probability, 0.0 - 100.0
    pub risk_percent: f64,
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Binary classifiers over scaled feature rows
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    /// Row width the model was fitted on
    fn n_features(&self) -> usize;

    fn predict_proba(&self, row: &[f64]) -> Result<ClassProbabilities, InferenceError>;
}

/// Model artifact, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClassifierModel {
    Knn(KNeighborsClassifier),
    Logistic(LogisticClassifier),
}

impl ClassifierModel {
    pub fn validate(&self) -> Result<(), InferenceError> {
        match self {
            ClassifierModel::Knn(m) => m.validate(),
            ClassifierModel::Logistic(m) => m.validate(),
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            ClassifierModel::Knn(m) => m,
            ClassifierModel::Logistic(m) => m,
        }
    }
}

impl Classifier for ClassifierModel {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn predict_proba(&self, row: &[f64]) -> Result<ClassProbabilities, InferenceError> {
        self.inner().predict_proba(row)
    }
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Standardize `vector`, score it, convert to a percentage
pub fn predict(
    vector: &EncodedVector,
    scaler: &StandardScaler,
    classifier: &dyn Classifier,
) -> Result<PredictionResult, InferenceError> {
    if classifier.n_features() != vector.len() {
        return Err(InferenceError::DimensionMismatch {
            component: "classifier",
            expected: classifier.n_features(),
            actual: vector.len(),
        });
    }

    let scaled = scaler.transform(vector.as_slice())?;
    if let Some(index) = scaled.iter().position(|v| !v.is_finite()) {
        return Err(InferenceError::NonFinite { index });
    }

    let proba = classifier.predict_proba(&scaled)?;
    if !proba.is_valid() {
        return Err(InferenceError::InvalidOutput {
            negative: proba.negative,
            positive: proba.positive,
        });
    }
    let probability = proba.positive.clamp(0.0, 1.0);

    Ok(PredictionResult {
        label: proba.label(),
        probability,
        risk_percent: (probability * 100.0).clamp(0.0, 100.0),
    })
}

// ============================================================================
// TESTS
// ============================================================================
