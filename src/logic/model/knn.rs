//! K-Nearest Neighbours classifier
//!
//! Lazy learner over the stored (already scaled) training rows. Neighbours
//! are ordered by distance, then by training index, so equal distances always
//! resolve the same way.

use serde::{Deserialize, Serialize};

use super::inference::{ClassProbabilities, Classifier, InferenceError};

/// Neighbour vote weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Every neighbour counts once
    #[default]
    Uniform,
    /// Inverse-distance weights; exact matches take the whole vote
    Distance,
}

fn default_p() -> f64 {
    2.0
}

/// Fitted KNN model as stored in the model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KNeighborsClassifier {
    /// Number of neighbours
    pub k: usize,
    /// Minkowski parameter (1 = Manhattan, 2 = Euclidean)
    #[serde(default = "default_p")]
    pub p: f64,
    #[serde(default)]
    pub weights: Weighting,
    /// Training rows, scaled
    pub x_train: Vec<Vec<f64>>,
    /// Training labels (0 or 1)
    pub y_train: Vec<u8>,
}

impl KNeighborsClassifier {
    pub fn new(k: usize, x_train: Vec<Vec<f64>>, y_train: Vec<u8>) -> Result<Self, InferenceError> {
        let model = Self {
            k,
            p: default_p(),
            weights: Weighting::Uniform,
            x_train,
            y_train,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn with_p(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    pub fn with_weights(mut self, weights: Weighting) -> Self {
        self.weights = weights;
        self
    }

    /// Check the stored training set
    pub fn validate(&self) -> Result<(), InferenceError> {
        let invalid = |msg: String| Err(InferenceError::InvalidModel(msg));

        let Some(first) = self.x_train.first() else {
            return invalid("knn model has no training rows".to_string());
        };
        let width = first.len();
        if width == 0 {
            return invalid("knn training rows are empty".to_string());
        }
        if self.x_train.len() != self.y_train.len() {
            return invalid(format!(
                "knn has {} training rows but {} labels",
                self.x_train.len(),
                self.y_train.len()
            ));
        }
        if self.k == 0 || self.k > self.x_train.len() {
            return invalid(format!(
                "knn k={} must be between 1 and {}",
                self.k,
                self.x_train.len()
            ));
        }
        if !(self.p >= 1.0 && self.p.is_finite()) {
            return invalid(format!("knn p={} must be a finite value >= 1", self.p));
        }
        for (i, row) in self.x_train.iter().enumerate() {
            if row.len() != width {
                return invalid(format!(
                    "knn training row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    width
                ));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return invalid(format!("knn training row {} contains a non-finite value", i));
            }
        }
        if let Some(label) = self.y_train.iter().find(|&&y| y > 1) {
            return invalid(format!("knn label {} is not binary", label));
        }
        Ok(())
    }

    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        if self.p == 1.0 {
            a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
        } else if self.p == 2.0 {
            a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt()
        } else {
            a.iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs().powf(self.p))
                .sum::<f64>()
                .powf(1.0 / self.p)
        }
    }

    /// The k nearest (distance, label) pairs
    fn neighbours(&self, row: &[f64]) -> Vec<(f64, usize, u8)> {
        let mut distances: Vec<(f64, usize, u8)> = self
            .x_train
            .iter()
            .zip(self.y_train.iter())
            .enumerate()
            .map(|(i, (train, &label))| (self.distance(row, train), i, label))
            .collect();

        distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        distances.truncate(self.k);
        distances
    }
}

impl Classifier for KNeighborsClassifier {
    fn name(&self) -> &'static str {
        "knn"
    }

    fn n_features(&self) -> usize {
        self.x_train.first().map_or(0, Vec::len)
    }

    fn predict_proba(&self, row: &[f64]) -> Result<ClassProbabilities, InferenceError> {
        if row.len() != self.n_features() {
            return Err(InferenceError::DimensionMismatch {
                component: "classifier",
                expected: self.n_features(),
                actual: row.len(),
            });
        }

        let nearest = self.neighbours(row);
        let mut votes = [0.0f64; 2];

        match self.weights {
            Weighting::Uniform => {
                for &(_, _, label) in &nearest {
                    votes[usize::from(label)] += 1.0;
                }
            }
            Weighting::Distance => {
                let exact: Vec<_> = nearest.iter().filter(|(d, _, _)| *d == 0.0).collect();
                if exact.is_empty() {
                    for &(dist, _, label) in &nearest {
                        votes[usize::from(label)] += 1.0 / dist;
                    }
                } else {
                    for &&(_, _, label) in &exact {
                        votes[usize::from(label)] += 1.0;
                    }
                }
            }
        }

        let mut total = votes[0] + votes[1];
        if total == 0.0 || !total.is_finite() {
            // Inverse distances all zero or overflowed; fall back to a plain vote
            votes = [0.0; 2];
            for &(_, _, label) in &nearest {
                votes[usize::from(label)] += 1.0;
            }
            total = votes[0] + votes[1];
        }
        Ok(ClassProbabilities::new(votes[0] / total, votes[1] / total))
    }
}
