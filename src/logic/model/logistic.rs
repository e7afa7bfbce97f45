//! Logistic regression classifier

use serde::{Deserialize, Serialize};

use super::inference::{ClassProbabilities, Classifier, InferenceError};

/// Linear model `sigmoid(w·x + b)` over scaled features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticClassifier {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, InferenceError> {
        let model = Self { coefficients, intercept };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), InferenceError> {
        if self.coefficients.is_empty() {
            return Err(InferenceError::InvalidModel("logistic model has no coefficients".to_string()));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(InferenceError::InvalidModel(
                "logistic model has non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }

    fn decision(&self, row: &[f64]) -> f64 {
        self.intercept + self.coefficients.iter().zip(row).map(|(w, x)| w * x).sum::<f64>()
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Classifier for LogisticClassifier {
    fn name(&self) -> &'static str {
        "logistic"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, row: &[f64]) -> Result<ClassProbabilities, InferenceError> {
        if row.len() != self.n_features() {
            return Err(InferenceError::DimensionMismatch {
                component: "classifier",
                expected: self.n_features(),
                actual: row.len(),
            });
        }
        let positive = sigmoid(self.decision(row));
        Ok(ClassProbabilities::new(1.0 - positive, positive))
    }
}
