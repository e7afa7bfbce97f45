//! Prediction handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{AppResult, AppState};
use crate::models::{PredictRequest, PredictionResponse};

/// Score one patient record
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Json(req) = payload?;
    let raw = req.into_raw_input()?;

    let (result, projection) = state.context.evaluate(&raw)?;

    if projection.has_dropped() {
        // Category unseen at training time: the selection has no effect
        tracing::warn!(
            dropped = ?projection.dropped,
            "Input columns missing from the trained schema were ignored"
        );
    }

    tracing::debug!(
        features = %projection.vector.to_log_entry(state.context.columns()),
        label = result.label.as_str(),
        risk_percent = result.risk_percent,
        "Prediction complete"
    );

    Ok(Json(result.into()))
}
