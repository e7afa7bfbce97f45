//! Standard Scaler
//!
//! Per-column standardization `(x - mean) / scale` with parameters fitted at
//! training time and loaded from the scaler artifact.

use serde::{Deserialize, Serialize};

use super::inference::InferenceError;

/// Fitted standardization parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column mean
    pub mean: Vec<f64>,
    /// Per-column scale (standard deviation)
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, InferenceError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Identity transform of the given width
    pub fn identity(n_features: usize) -> Self {
        Self {
            mean: vec![0.0; n_features],
            scale: vec![1.0; n_features],
        }
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Check parameter shapes and values
    pub fn validate(&self) -> Result<(), InferenceError> {
        if self.mean.is_empty() {
            return Err(InferenceError::InvalidModel("scaler has no columns".to_string()));
        }
        if self.mean.len() != self.scale.len() {
            return Err(InferenceError::InvalidModel(format!(
                "scaler mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(i) = self.mean.iter().chain(self.scale.iter()).position(|v| !v.is_finite()) {
            return Err(InferenceError::InvalidModel(format!(
                "scaler parameter {} is not finite",
                i
            )));
        }
        Ok(())
    }

    /// Standardize one row
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if row.len() != self.n_features() {
            return Err(InferenceError::DimensionMismatch {
                component: "scaler",
                expected: self.n_features(),
                actual: row.len(),
            });
        }

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| {
                // Constant column at fit time
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 0.5]).unwrap();
        let out = scaler.transform(&[14.0, 1.0]).unwrap();
        assert_eq!(out, vec![2.0, 2.0]);
    }

    #[test]
    fn test_zero_scale_treated_as_one() {
        let scaler = StandardScaler::new(vec![1.0], vec![0.0]).unwrap();
        assert_eq!(scaler.transform(&[3.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_identity() {
        let scaler = StandardScaler::identity(3);
        assert_eq!(scaler.transform(&[1.0, 2.0, 3.0]).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let scaler = StandardScaler::identity(2);
        let err = scaler.transform(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            InferenceError::DimensionMismatch { component: "scaler", expected: 2, actual: 3 }
        );
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(StandardScaler::new(vec![], vec![]).is_err());
        assert!(StandardScaler::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).is_err());
    }

    #[test]
    fn test_deserialize() {
        let scaler: StandardScaler =
            serde_json::from_str(r#"{"mean": [1.0, 2.0], "scale": [0.5, 4.0]}"#).unwrap();
        assert_eq!(scaler.n_features(), 2);
        assert!(scaler.validate().is_ok());
    }
}
