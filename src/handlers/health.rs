//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::logic::model::Classifier;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    timestamp: i64,
    classifier: &'static str,
    column_count: usize,
    schema_fingerprint: String,
    loaded_at: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let columns = state.context.columns();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        timestamp: chrono::Utc::now().timestamp(),
        classifier: state.context.classifier().name(),
        column_count: columns.len(),
        schema_fingerprint: format!("{:08x}", columns.fingerprint()),
        loaded_at: state.context.loaded_at().timestamp(),
    })
}
