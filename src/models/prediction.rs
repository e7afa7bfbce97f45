//! Prediction response model

use serde::{Deserialize, Serialize};

use crate::logic::model::{PredictionResult, RiskLabel};

/// Coarse score band, matching the gauge steps of the web client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    /// 0-30 low, 30-70 moderate, 70-100 high
    pub fn from_percent(percent: f64) -> Self {
        if percent < 30.0 {
            RiskBand::Low
        } else if percent < 70.0 {
            RiskBand::Moderate
        } else {
            RiskBand::High
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub label: RiskLabel,
    pub risk_percent: f64,
    pub risk_band: RiskBand,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            label: result.label,
            risk_percent: result.risk_percent,
            risk_band: RiskBand::from_percent(result.risk_percent),
        }
    }
}
